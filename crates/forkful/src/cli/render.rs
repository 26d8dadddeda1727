use forkfulapp::Recipe;

/// Print the recipe list, one line per record, in stored order.
pub fn recipe_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes yet. Add one with `forkful add <name>`.");
        return;
    }

    for recipe in recipes {
        let mut line = format!("{}  {}", recipe.id, recipe.name);
        if recipe.image.is_some() {
            line.push_str("  [photo]");
        }
        if let Some(notes) = &recipe.notes {
            if let Some(first_line) = notes.lines().next() {
                line.push_str(&format!("  ({})", first_line));
            }
        }
        println!("{}", line);
    }
}
