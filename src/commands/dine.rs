use colored::Colorize;

use crate::food::models::Restaurant;
use crate::session::SessionState;

pub const CUISINES: &[&str] = &["Italian", "Chinese", "Japanese", "American", "Mexican"];

/// A shortcut number picks from `CUISINES`; anything else is used as typed.
pub fn resolve_cuisine(arg: &str) -> Option<String> {
    let arg = arg.trim();
    if arg.is_empty() {
        return None;
    }
    if let Ok(pos) = arg.parse::<usize>() {
        return pos
            .checked_sub(1)
            .and_then(|i| CUISINES.get(i))
            .map(|c| c.to_string());
    }
    let known = CUISINES.iter().find(|c| c.eq_ignore_ascii_case(arg));
    Some(known.map(|c| c.to_string()).unwrap_or_else(|| arg.to_string()))
}

pub fn render_dine_tab(state: &SessionState) -> String {
    let mut out = String::from("\n🍔 Find Nearby Restaurants\n");

    let shortcuts: Vec<String> = CUISINES
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c))
        .collect();
    out.push_str(&format!("  {}\n", shortcuts.join("  ")));

    if state.restaurants_loading {
        out.push_str(&format!("  {}\n", "searching...".yellow()));
    }
    for restaurant in &state.restaurants {
        out.push_str(&render_restaurant(restaurant));
    }
    out
}

fn render_restaurant(restaurant: &Restaurant) -> String {
    let rating = match restaurant.rating {
        Some(rating) => format!("⭐ {}", rating),
        None => "⭐ n/a".to_string(),
    };
    let mut line = format!("  • {} {}", restaurant.name.bold(), rating.yellow());
    if let Some(address) = &restaurant.address {
        line.push_str(&format!("  {}", address.dimmed()));
    }
    if let Some(km) = restaurant.distance_km {
        line.push_str(&format!("  ({:.1} km)", km));
    }
    line.push('\n');
    line
}
