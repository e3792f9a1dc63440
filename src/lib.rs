//! Read the published amateur radio examination question pools into a
//! structured Element → Subelement → Group → Question object graph, and
//! look questions up again by their identifier.

mod regex;

pub mod language;
pub mod lookup;
pub mod output;
pub mod parsing;
pub mod problem;
