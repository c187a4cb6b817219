use serde::{Deserialize, Serialize};

/// Name emphasised in author lines.
pub const OWNER_NAME: &str = "Junjie Wen";

const EMBEDDED: &str = include_str!("../data/publications.json");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub highlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub links: Vec<PublicationLink>,
}

impl Publication {
    pub fn is_oral(&self) -> bool {
        self.venue.contains("Oral")
    }
}

pub fn parse(json: &str) -> Result<Vec<Publication>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Publications bundled into the binary at build time.
pub fn embedded() -> Result<Vec<Publication>, serde_json::Error> {
    parse(EMBEDDED)
}

pub struct YearGroup<'a> {
    pub year: &'a str,
    pub publications: Vec<&'a Publication>,
}

/// Newest year first; entries keep their listed order within a year.
pub fn group_by_year(publications: &[Publication]) -> Vec<YearGroup<'_>> {
    let mut years: Vec<&str> = Vec::new();
    for publication in publications {
        if !years.contains(&publication.year.as_str()) {
            years.push(&publication.year);
        }
    }
    years.sort_by(|a, b| year_key(b).cmp(&year_key(a)).then_with(|| b.cmp(a)));

    years
        .into_iter()
        .map(|year| YearGroup {
            year,
            publications: publications.iter().filter(|p| p.year == year).collect(),
        })
        .collect()
}

fn year_key(year: &str) -> u32 {
    year.trim().parse().unwrap_or(0)
}

#[derive(Debug, PartialEq, Eq)]
pub struct AuthorSegment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Split an author line around every occurrence of `name`, keeping an
/// equal-contribution `*` attached to the highlighted part.
pub fn author_segments<'a>(authors: &'a str, name: &str) -> Vec<AuthorSegment<'a>> {
    let mut segments = Vec::new();
    if name.is_empty() {
        segments.push(AuthorSegment {
            text: authors,
            highlighted: false,
        });
        return segments;
    }

    let mut rest = authors;
    while let Some(start) = rest.find(name) {
        let mut end = start + name.len();
        if rest[end..].starts_with('*') {
            end += 1;
        }

        if start > 0 {
            segments.push(AuthorSegment {
                text: &rest[..start],
                highlighted: false,
            });
        }
        segments.push(AuthorSegment {
            text: &rest[start..end],
            highlighted: true,
        });
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        segments.push(AuthorSegment {
            text: rest,
            highlighted: false,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(title: &str, year: &str) -> Publication {
        Publication {
            title: title.to_string(),
            authors: String::new(),
            venue: "ICRA".to_string(),
            year: year.to_string(),
            highlight: false,
            citations: None,
            video: None,
            image: None,
            links: Vec::new(),
        }
    }

    #[test]
    fn embedded_data_parses() {
        let publications = embedded().unwrap();
        assert!(!publications.is_empty());
        assert!(publications.iter().all(|p| !p.title.is_empty()));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let parsed = parse(r#"[{"title":"T","authors":"A","venue":"V","year":"2024"}]"#).unwrap();

        assert!(!parsed[0].highlight);
        assert_eq!(parsed[0].citations, None);
        assert!(parsed[0].links.is_empty());
    }

    #[test]
    fn serialization_omits_empty_optionals() {
        let json = serde_json::to_string(&publication("T", "2024")).unwrap();

        assert!(!json.contains("highlight"));
        assert!(!json.contains("citations"));
        assert!(json.contains("\"links\":[]"));
    }

    #[test]
    fn groups_newest_year_first_preserving_order() {
        let publications = vec![
            publication("a", "2024"),
            publication("b", "2026"),
            publication("c", "2024"),
            publication("d", "2025"),
        ];

        let groups = group_by_year(&publications);
        let years: Vec<&str> = groups.iter().map(|g| g.year).collect();
        assert_eq!(years, vec!["2026", "2025", "2024"]);

        let titles: Vec<&str> = groups[2].publications.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn author_segments_highlight_owner_with_marker() {
        let segments = author_segments("Junjie Wen*, Yichen Zhu*, Feifei Feng", OWNER_NAME);

        assert_eq!(
            segments,
            vec![
                AuthorSegment {
                    text: "Junjie Wen*",
                    highlighted: true
                },
                AuthorSegment {
                    text: ", Yichen Zhu*, Feifei Feng",
                    highlighted: false
                },
            ]
        );
    }

    #[test]
    fn author_segments_in_middle_of_line() {
        let segments = author_segments("Kun Wu, Junjie Wen, Jian Tang", OWNER_NAME);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "Junjie Wen");
        assert!(segments[1].highlighted);
        assert_eq!(segments[2].text, ", Jian Tang");
    }

    #[test]
    fn author_line_without_owner_is_one_segment() {
        let segments = author_segments("Kun Wu, Jian Tang", OWNER_NAME);
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
    }

    #[test]
    fn oral_venues_are_flagged() {
        let mut oral = publication("x", "2025");
        oral.venue = "EMNLP 2025 Main Oral".to_string();

        assert!(oral.is_oral());
        assert!(!publication("y", "2025").is_oral());
    }
}
