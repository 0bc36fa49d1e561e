use serde::Serialize;

pub type CourseId = String;
pub type Level = u32;

///A single course as it appears in one level column of the planner
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub area: String,
    pub level: Level,
    pub prereq: Vec<CourseId>,
    pub credits: i64,
}

/// An academic program: one generated HTML page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub title: String,
    pub code: String,
    pub courses: Vec<Course>,
}

/// A category with the color it was given and the CSS variable that carries it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaColor {
    pub area: String,
    pub var_name: String,
    pub color: String,
}

/// How colors are drawn from the bag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Deterministic,
    Randomized { seed: Option<u64> },
}

impl ColorMode {
    pub fn from_flags(randomize: bool, seed: Option<u64>) -> Self {
        if randomize {
            ColorMode::Randomized { seed }
        } else {
            ColorMode::Deterministic
        }
    }
}
