//! Plain-text rendering of the two views.

use crate::model::Recipe;
use crate::views::{DetailController, ListController};

pub const TITLE: &str = "👩‍🍳 천개의 레시피 🥘";
pub const LOADING: &str = "Loading...";

fn header(output: &mut String, status_message: &str) {
    output.push_str(TITLE);
    output.push('\n');
    output.push_str(status_message);
    output.push('\n');
}

/// Current page of the list followed by the page selector.
///
/// The selected page is shown as `[n]`, the others as ` n `.
pub fn render_list(view: &ListController) -> String {
    let mut output = String::new();
    header(&mut output, view.status_message());

    for recipe in view.current_page_recipes() {
        output.push('\n');
        output.push_str(&format!("#{} {}\n", recipe.id, recipe.name));
        output.push_str(&format!("난이도: {}\n", recipe.difficulty));
        output.push_str(&format!("{}\n", recipe.image));
        if !recipe.tags.is_empty() {
            output.push_str(&format!("{}\n", recipe.tags.join(" · ")));
        }
    }

    let selector = view
        .page_numbers()
        .map(|page| {
            if page == view.current_page() {
                format!("[{page}]")
            } else {
                format!(" {page} ")
            }
        })
        .collect::<Vec<_>>()
        .join("");
    output.push('\n');
    output.push_str(&selector);
    output.push('\n');
    output
}

/// The loaded recipe, or the loading placeholder while nothing has arrived
pub fn render_detail(view: &DetailController) -> String {
    let Some(recipe) = view.recipe() else {
        return format!("{LOADING}\n");
    };

    let mut output = String::new();
    header(&mut output, &view.status_message());
    output.push('\n');
    render_recipe(&mut output, &recipe);
    output
}

fn render_recipe(output: &mut String, recipe: &Recipe) {
    output.push_str(&format!("{} ({})\n", recipe.name, recipe.difficulty));
    output.push_str(&format!("{}\n", recipe.image));
    output.push_str(&format!("cuisine: {}\n", recipe.cuisine));
    output.push_str(&format!("prep time: {} minutes\n", recipe.prep_time_minutes));
    output.push_str(&format!("cook time: {} minutes\n", recipe.cook_time_minutes));
    output.push_str(&format!("servings: {}\n", recipe.servings));
    output.push_str(&format!(
        "calories per serving: {}\n",
        recipe.calories_per_serving
    ));
    output.push_str(&format!(
        "rating: {:.1} ({} reviews)\n",
        recipe.rating, recipe.review_count
    ));
    if !recipe.meal_type.is_empty() {
        output.push_str(&format!("meal: {}\n", recipe.meal_type.join(", ")));
    }
    if !recipe.tags.is_empty() {
        output.push_str(&format!("tags: {}\n", recipe.tags.join(", ")));
    }

    output.push_str("\nIngredients\n");
    for ingredient in &recipe.ingredients {
        output.push_str(&format!("- {ingredient}\n"));
    }

    output.push_str("\nInstructions\n");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", step + 1, instruction));
    }
}
