// Level 2 definition
use super::Level;

pub static LEVEL2_QUESTIONS: [(&str, [&str; 4], usize); 2] = [
    ("5 + 5 = ?", ["5", "10", "15", "20"], 1),
    ("10 - 3 = ?", ["7", "8", "9", "6"], 0),
];

pub fn level2() -> Level {
    Level::from_table("Level 2", &LEVEL2_QUESTIONS)
}
