use serde::Serialize;

use crate::language::{Element, Span};
use crate::problem::{Diagnostics, Problem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub id: String,
    pub questions: usize,
    pub topics: usize,
    pub subtopics: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubelementCount {
    pub code: String,
    pub declared_groups: String,
    pub groups: Vec<GroupCount>,
}

/// Counts taken from a finished Element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub element: String,
    pub name: String,
    pub years: Span,
    pub timestamp: String,
    pub subelements: usize,
    pub groups: usize,
    pub questions: usize,
    pub topics: usize,
    pub subtopics: usize,
    pub breakdown: Vec<SubelementCount>,
}

impl Summary {
    pub fn of(element: &Element) -> Summary {
        let breakdown: Vec<SubelementCount> = element
            .subelements
            .iter()
            .map(|subelement| SubelementCount {
                code: subelement
                    .sub_el
                    .clone(),
                declared_groups: subelement
                    .numg
                    .clone(),
                groups: subelement
                    .groups
                    .iter()
                    .map(|group| GroupCount {
                        id: format!("{}{}", group.subelement, group.group_id),
                        questions: group
                            .questions
                            .len(),
                        topics: group
                            .topics()
                            .len(),
                        subtopics: group
                            .subtopics()
                            .len(),
                    })
                    .collect(),
            })
            .collect();

        let groups = breakdown
            .iter()
            .flat_map(|subelement| subelement.groups.iter());

        Summary {
            element: element
                .elem
                .clone(),
            name: element
                .elname
                .clone(),
            years: element
                .yrvalid
                .clone(),
            timestamp: element
                .timestamp
                .clone(),
            subelements: breakdown.len(),
            groups: groups
                .clone()
                .count(),
            questions: groups
                .clone()
                .map(|group| group.questions)
                .sum(),
            topics: groups
                .clone()
                .map(|group| group.topics)
                .sum(),
            subtopics: groups
                .map(|group| group.subtopics)
                .sum(),
            breakdown,
        }
    }

    /// Report the summary as a block of Info diagnostics.
    pub fn emit(&self, problems: &mut Diagnostics) {
        let name = if self
            .name
            .is_empty()
        {
            String::new()
        } else {
            format!("({} Class) ", self.name)
        };

        problems.report(
            Problem::SummaryElement,
            format!(
                "*** Summary - Element {} - {} {}{}-{} ***",
                self.element, self.timestamp, name, self.years.begin, self.years.end
            ),
        );
        problems.report(
            Problem::SummarySubelements,
            format!("Subelements: {}", self.subelements),
        );
        for subelement in &self.breakdown {
            problems.report(
                Problem::SummarySubelement,
                format!(
                    "  Sub element: {}, Groups: {}",
                    subelement.code, subelement.declared_groups
                ),
            );
            for group in &subelement.groups {
                problems.report(
                    Problem::SummaryGroup,
                    format!(
                        "    Group: {}, questions: {}, topics: {}, subtopics: {}",
                        group.id, group.questions, group.topics, group.subtopics
                    ),
                );
            }
        }
        problems.report(
            Problem::SummaryTotals,
            format!(
                "Subelements: {}, groups: {}, questions: {}, topics: {}, subtopics: {}",
                self.subelements, self.groups, self.questions, self.topics, self.subtopics
            ),
        );
        problems.report(Problem::SummaryDone, "*** End of Processing ***");
    }
}
