// Level 1 definition
// Warm-up addition; both answers sit in the middle of the choice list.
use super::Level;

pub static LEVEL1_QUESTIONS: [(&str, [&str; 4], usize); 2] = [
    ("1 + 1 = ?", ["1", "2", "3", "4"], 1),
    ("2 + 2 = ?", ["2", "3", "4", "5"], 2),
];

pub fn level1() -> Level {
    Level::from_table("Level 1", &LEVEL1_QUESTIONS)
}
