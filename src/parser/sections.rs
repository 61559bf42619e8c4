//! Section splitting
//!
//! Buckets the lines left after header extraction under `== Heading ==`
//! markers. Prose before the first heading is discarded. Unrecognized
//! headings still collect lines, but their buckets are dropped at the end.

/// The eight recognized sections, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionName {
    Description,
    Faq,
    Installation,
    Screenshots,
    Reviews,
    OtherNotes,
    Changelog,
    UpgradeNotice,
}

impl SectionName {
    pub const ALL: [SectionName; 8] = [
        SectionName::Description,
        SectionName::Faq,
        SectionName::Installation,
        SectionName::Screenshots,
        SectionName::Reviews,
        SectionName::OtherNotes,
        SectionName::Changelog,
        SectionName::UpgradeNotice,
    ];

    /// Lowercase heading text as written in documents
    pub fn heading(&self) -> &'static str {
        match self {
            SectionName::Description => "description",
            SectionName::Faq => "frequently asked questions",
            SectionName::Installation => "installation",
            SectionName::Screenshots => "screenshots",
            SectionName::Reviews => "reviews",
            SectionName::OtherNotes => "other notes",
            SectionName::Changelog => "changelog",
            SectionName::UpgradeNotice => "upgrade notice",
        }
    }

    pub fn from_heading(heading: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.heading() == heading)
    }
}

/// Bucket key while splitting: recognized sections or literal heading text
#[derive(Debug, Clone, PartialEq, Eq)]
enum Bucket {
    Known(SectionName),
    Unknown(String),
}

/// Raw section lines in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLines {
    buckets: Vec<(SectionName, Vec<String>)>,
}

impl SectionLines {
    pub fn get(&self, name: SectionName) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, lines)| lines.as_slice())
    }

    /// Lines of a section, or `None` when absent or blank throughout
    pub fn non_empty(&self, name: SectionName) -> Option<&[String]> {
        self.get(name)
            .filter(|lines| lines.iter().any(|l| !l.trim().is_empty()))
    }

    pub fn names(&self) -> impl Iterator<Item = SectionName> + '_ {
        self.buckets.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Lowercase the heading line and strip every `==`
fn heading_text(line: &str) -> String {
    line.to_lowercase().replace("==", "").trim().to_string()
}

/// Split lines into recognized sections
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> SectionLines {
    let mut buckets: Vec<(Bucket, Vec<String>)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in lines {
        let line = line.as_ref();

        if line.starts_with("==") {
            let text = heading_text(line);
            let bucket = match SectionName::from_heading(&text) {
                Some(name) => Bucket::Known(name),
                None => Bucket::Unknown(text),
            };
            // A repeated heading restarts its bucket in place
            let index = match buckets.iter().position(|(b, _)| *b == bucket) {
                Some(index) => {
                    buckets[index].1.clear();
                    index
                }
                None => {
                    buckets.push((bucket, Vec::new()));
                    buckets.len() - 1
                }
            };
            current = Some(index);
            continue;
        }

        if let Some(index) = current {
            buckets[index].1.push(line.to_string());
        }
    }

    SectionLines {
        buckets: buckets
            .into_iter()
            .filter_map(|(bucket, lines)| match bucket {
                Bucket::Known(name) => Some((name, lines)),
                Bucket::Unknown(_) => None,
            })
            .collect(),
    }
}
