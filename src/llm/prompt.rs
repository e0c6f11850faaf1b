use std::fmt::Write as _;

use crate::database::{Category, Purchase};

const INSTRUCTIONS: &str = r#"You are an AI assistant that helps to categorize purchases.

TASK: Categorize the following purchase into one of the available categories.

IMPORTANT INSTRUCTIONS:
1. Take your time to think carefully about what this product actually is.
2. Consider specific keywords and context clues in the purchase description.
3. If the item contains multiple ingredients or components, focus on the main ingredient.
4. For prepared foods, categorize based on the primary component.

REQUIRED RESPONSE FORMAT:
Your final answer MUST be provided in valid JSON format with a single 'ID' field containing the category ID as a number. Example: {"ID": 1}

DO NOT include any explanations, reasoning, or additional text in your output - ONLY the JSON object.

"#;

/// Instructions plus the category list; shared by every purchase in a run.
pub fn build_base_prompt(categories: &[Category]) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    prompt.push_str("Available categories: \n");
    for category in categories {
        let _ = writeln!(prompt, "ID: {}, Category: {} ", category.id, category.name);
    }
    prompt.push('\n');
    prompt
}

pub fn purchase_prompt(base: &str, purchase: &Purchase) -> String {
    format!("{}{} bought for {}", base, purchase.product, purchase.price)
}
