//! Shopping list aggregation
//!
//! Sums the ingredient lines of every recipe in a cart per
//! `(name, measurement_unit)` and renders a plain-text list ordered by
//! name, then unit.

use std::collections::BTreeMap;

use shared::models::CartLine;

pub const HEADER: &str = "Shopping list:";
pub const FILE_NAME: &str = "shopping_list.txt";

/// Totals keyed by `(name, unit)`
pub fn aggregate(lines: &[CartLine]) -> BTreeMap<(String, String), i64> {
    let mut totals = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name.clone(), line.measurement_unit.clone()))
            .or_insert(0) += line.amount;
    }
    totals
}

/// Render the text file body
pub fn render(lines: &[CartLine]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for ((name, unit), total) in aggregate(lines) {
        out.push_str(&format!("{name} ({unit}) - {total}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, amount: i64) -> CartLine {
        CartLine {
            name: name.into(),
            measurement_unit: unit.into(),
            amount,
        }
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(render(&[]), "Shopping list:\n");
    }

    #[test]
    fn test_same_ingredient_is_summed() {
        let lines = [line("flour", "g", 200), line("flour", "g", 300)];
        assert_eq!(render(&lines), "Shopping list:\nflour (g) - 500\n");
    }

    #[test]
    fn test_units_kept_apart_and_ordered() {
        let lines = [
            line("sugar", "g", 50),
            line("milk", "ml", 200),
            line("milk", "cup", 1),
            line("eggs", "pcs", 2),
            line("milk", "ml", 100),
        ];
        assert_eq!(
            render(&lines),
            "Shopping list:\neggs (pcs) - 2\nmilk (cup) - 1\nmilk (ml) - 300\nsugar (g) - 50\n"
        );
    }

    #[test]
    fn test_aggregate_keys() {
        let totals = aggregate(&[line("salt", "pinch", 1), line("salt", "pinch", 2)]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&("salt".to_string(), "pinch".to_string())], 3);
    }
}
