// Level 3 definition
// Final level: division and multiplication.
use super::Level;

pub static LEVEL3_QUESTIONS: [(&str, [&str; 4], usize); 2] = [
    ("12 ÷ 4 = ?", ["2", "3", "4", "6"], 1),
    ("3 x 3 = ?", ["6", "8", "9", "12"], 2),
];

pub fn level3() -> Level {
    Level::from_table("Level 3", &LEVEL3_QUESTIONS)
}
