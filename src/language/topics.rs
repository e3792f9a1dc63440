/// Derive topics and subtopics from a group description.
///
/// The description is split on `;` into segments. A segment of the form
/// `topic: a, b` contributes `topic` to the topics and `topic: a`,
/// `topic: b` to the subtopics; any other segment is a topic on its own.
/// Empty segments are dropped. Order follows the description.
pub fn split_topics(description: &str) -> (Vec<String>, Vec<String>) {
    let mut topics = Vec::new();
    let mut subtopics = Vec::new();

    for segment in description.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        match segment.split_once(':') {
            Some((topic, items)) => {
                let topic = topic.trim();
                for item in items.split(',') {
                    let item = item.trim();
                    if !item.is_empty() {
                        subtopics.push(format!("{}: {}", topic, item));
                    }
                }
                topics.push(topic.to_string());
            }
            None => topics.push(segment.to_string()),
        }
    }

    (topics, subtopics)
}
