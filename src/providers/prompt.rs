/// The prompt template used for generating a recipe from an ingredient list.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro. `{ingredients}` is replaced with the
/// comma-separated ingredient list.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

const INGREDIENTS_PLACEHOLDER: &str = "{ingredients}";

/// Build the generation prompt for the given ingredients.
pub fn build_recipe_prompt(ingredients: &[String]) -> String {
    RECIPE_PROMPT_TEMPLATE
        .trim_end()
        .replace(INGREDIENTS_PLACEHOLDER, &ingredients.join(", "))
}
