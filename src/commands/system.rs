pub fn help_text() -> String {
    let mut out = String::new();

    out.push_str("\n🍳 Pantry Commands:\n");
    out.push_str("  add <ingredient>[, ...]  - Add ingredients to your pantry\n");
    out.push_str("  quick [n|name]           - Show or use the quick-add list\n");
    out.push_str("  scan [hint|photo.jpg]    - Recognize ingredients and add them\n");
    out.push_str("  remove <n|ingredient>    - Remove an ingredient\n");
    out.push_str("  pantry                   - Show pantry and matching recipes\n");
    out.push('\n');

    out.push_str("📖 Recipe Commands:\n");
    out.push_str("  open <n>     - Show recipe details\n");
    out.push_str("  close        - Close the recipe details\n");
    out.push_str("  missing <n>  - Shopping list for a local recipe\n");
    out.push_str("  source <n>   - Open a web recipe in your browser\n");
    out.push('\n');

    out.push_str("🍔 Dine Out Commands:\n");
    out.push_str("  dine [n|cuisine]  - Search nearby restaurants by cuisine\n");
    out.push_str("  tab <pantry|dine> - Switch tabs\n");
    out.push('\n');

    out.push_str("⚙️ System Commands:\n");
    out.push_str("  status  - Check the backend\n");
    out.push_str("  help    - Show this help menu\n");
    out.push_str("  exit    - Exit the program\n");

    out
}

pub fn is_quit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "exit" | "quit")
}
