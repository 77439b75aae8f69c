//! A realistic pool for the default constraint set.
//!
//! Eight groups, 34 items. With the default constraints (budget 100, quotas
//! GK 2 / DEF 5 / MID 5 / FWD 3, at most 3 per group) a score-first
//! allocation without hints fills every quota at a total cost of exactly
//! 100.0, while a hint for an expensive midfielder leaves a forward slot
//! open.

use squadforge_core::{Category, ConstraintSet, Item};

use crate::item::item;

const ROWS: &[(&str, Category, &str, i64, u32)] = &[
    ("Aaron Vale", Category::Goalkeeper, "Arsenal", 55, 150),
    ("Bruno Soto", Category::Goalkeeper, "Chelsea", 50, 140),
    ("Carl Henning", Category::Goalkeeper, "Everton", 45, 120),
    ("Dario Pic", Category::Goalkeeper, "Fulham", 45, 110),
    ("Emil Roth", Category::Goalkeeper, "Liverpool", 40, 90),
    ("Felix Mond", Category::Goalkeeper, "Wolves", 40, 80),
    ("Gale Carter", Category::Defender, "Arsenal", 60, 170),
    ("Hugo Brandt", Category::Defender, "Liverpool", 65, 180),
    ("Ivo Lind", Category::Defender, "Chelsea", 50, 140),
    ("Jon Ortega", Category::Defender, "Newcastle", 45, 130),
    ("Kai Dunn", Category::Defender, "Arsenal", 50, 135),
    ("Leon Faure", Category::Defender, "Brighton", 45, 110),
    ("Milo Stark", Category::Defender, "Fulham", 45, 100),
    ("Nils Berg", Category::Defender, "Everton", 40, 90),
    ("Otto Kranz", Category::Defender, "Wolves", 40, 85),
    ("Piet Smal", Category::Defender, "Newcastle", 45, 105),
    ("Quinn Rowe", Category::Midfielder, "Liverpool", 120, 260),
    ("Rafa Lemos", Category::Midfielder, "Arsenal", 100, 210),
    ("Sami Okoro", Category::Midfielder, "Chelsea", 85, 200),
    ("Theo Marsh", Category::Midfielder, "Brighton", 65, 170),
    ("Ugo Ferri", Category::Midfielder, "Newcastle", 70, 175),
    ("Viktor Hale", Category::Midfielder, "Arsenal", 80, 180),
    ("Wes Tindall", Category::Midfielder, "Fulham", 55, 120),
    ("Xavi Cano", Category::Midfielder, "Everton", 50, 110),
    ("Yuri Petrov", Category::Midfielder, "Wolves", 50, 100),
    ("Zeb Ashby", Category::Midfielder, "Brighton", 45, 80),
    ("Adam Kessler", Category::Forward, "Liverpool", 110, 230),
    ("Ben Ruiz", Category::Forward, "Chelsea", 80, 190),
    ("Cole Mensah", Category::Forward, "Newcastle", 70, 160),
    ("Dan Whitfield", Category::Forward, "Everton", 60, 130),
    ("Eli Norris", Category::Forward, "Wolves", 55, 110),
    ("Finn Grady", Category::Forward, "Fulham", 50, 100),
    ("Gus Tamm", Category::Forward, "Brighton", 45, 85),
    ("Hal Ivers", Category::Forward, "Spurs", 45, 70),
];

/// Returns the standard pool; ids run from 1 in table order.
pub fn standard_pool() -> Vec<Item> {
    ROWS.iter()
        .zip(1u32..)
        .map(|(&(name, category, group, price, score), id)| {
            item(id, name, category, group, price, score)
        })
        .collect()
}

/// Returns the default constraint set the standard pool is tuned for.
pub fn standard_constraints() -> ConstraintSet {
    ConstraintSet::default()
}

/// Ids of the score-first squad for the standard pool and constraints.
pub const STANDARD_SQUAD_IDS: [u32; 15] = [1, 2, 8, 7, 9, 11, 10, 17, 19, 21, 20, 23, 27, 29, 32];
