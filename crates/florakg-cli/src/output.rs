//! Terminal output formatting.

use colored::Colorize;
use florakg_core::{Answer, PlantDetail, Route};

/// Print an answer, optionally followed by the route that produced it.
pub fn print_answer(answer: &Answer, show_route: bool) {
    println!("{}", answer.text);
    if show_route {
        println!("{}", format!("[{}]", route_label(&answer.route)).dimmed());
    }
}

fn route_label(route: &Route) -> String {
    match route {
        Route::InvalidInput => "invalid input".to_string(),
        Route::Entity { name, intent } => format!("entity {} / {}", name, intent.as_str()),
        Route::EntityMissing { name } => format!("entity {} missing", name),
        Route::AliasUnresolvable { alias, target } => format!("alias {} -> {} not loaded", alias, target),
        Route::Catalog => "catalog".to_string(),
        Route::Fallback => "fallback".to_string(),
        Route::StoreError => "store error".to_string(),
    }
}

/// Print all plant names on one wrapped line.
pub fn print_plant_list(names: &[String], delimiter: &str) {
    if names.is_empty() {
        println!("{}", "No plants found.".dimmed());
        return;
    }
    println!("{}", names.join(delimiter));
    println!();
    println!("{} plant(s) total", names.len());
}

/// Print one plant record.
pub fn print_plant_detail(detail: &PlantDetail, delimiter: &str) {
    let latin = detail.latin.as_deref().unwrap_or("未知");
    println!("{} {}", detail.name.green().bold(), latin.italic().dimmed());
    println!("{}", "─".repeat(40));

    field("科", detail.family.as_deref().unwrap_or("未知"));
    field("属", detail.genus.as_deref().unwrap_or("未知"));
    field("分布区域", &detail.distribution);
    field("民俗用途", &detail.folk_use);
    field("生态意义", &detail.ecological);
    field("文化象征", &detail.cultural_symbol);

    list("象征", &detail.symbols, delimiter);
    list("药用功效", &detail.medicinal, delimiter);
    list("文献出处", &detail.literature, delimiter);
    list("关联节日", &detail.festivals, delimiter);
}

fn field(label: &str, value: &str) {
    println!("  {}：{}", label.bold(), value);
}

fn list(label: &str, values: &[String], delimiter: &str) {
    if values.is_empty() {
        println!("  {}：{}", label.bold(), "无".dimmed());
    } else {
        println!("  {}：{}", label.bold(), values.join(delimiter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use florakg_core::qa::intent::Intent;

    #[test]
    fn test_route_label() {
        let route = Route::Entity {
            name: "梅".to_string(),
            intent: Intent::Symbolism,
        };
        assert_eq!(route_label(&route), "entity 梅 / symbolism");
        assert_eq!(route_label(&Route::Fallback), "fallback");
    }
}
