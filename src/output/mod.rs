//! Output generation: the Element as JSON, and a plain text report of the
//! summary counts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tinytemplate::{format_unescaped, TinyTemplate};
use tracing::info;

use crate::language::Element;
use crate::parsing::Summary;

static REPORT: &'static str = "Element {element} ({name}) {years.begin}-{years.end}
Generated {timestamp}
{{ for subelement in breakdown }}  Sub element: {subelement.code}, Groups: {subelement.declared_groups}
{{ for group in subelement.groups }}    Group: {group.id}, questions: {group.questions}, topics: {group.topics}, subtopics: {group.subtopics}
{{ endfor }}{{ endfor }}Subelements: {subelements}, groups: {groups}, questions: {questions}, topics: {topics}, subtopics: {subtopics}
";

/// Name of the JSON file an Element is written to.
pub fn json_filename(element: &Element) -> String {
    format!("element{}.json", element.elem)
}

/// Write the Element as pretty printed JSON into the given directory,
/// creating it if necessary. Returns the path of the file written.
pub fn write_json(element: &Element, directory: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let target = directory.join(json_filename(element));
    info!("Writing file: {}", target.display());

    let file = File::create(&target)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, element)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(target)
}

/// Render the summary counts as a multi-line report.
pub fn render_summary(summary: &Summary) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("summary", REPORT)?;

    tt.render("summary", summary)
}
