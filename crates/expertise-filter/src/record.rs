//! Person records as returned by the person-search endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::token::Category;

/// A primary key as it appears on the wire: either a string or a bare integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePk {
    /// String keys, e.g. hex uuids.
    Text(String),
    /// Numeric keys.
    Number(u64),
}

/// Deserializes a primary key into its string form.
fn pk_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WirePk::deserialize(deserializer)? {
        WirePk::Text(s) => s,
        WirePk::Number(n) => n.to_string(),
    })
}

/// A related node (institute, role, advisor, ...) referenced by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Primary key of the node.
    #[serde(deserialize_with = "pk_string")]
    pub pk: String,
    /// Display name of the node.
    pub name: String,
}

impl Entity {
    /// Creates an entity.
    pub fn new(pk: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            name: name.into(),
        }
    }
}

/// The person a record describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    /// Primary key of the person node.
    #[serde(deserialize_with = "pk_string")]
    pub pk: String,
    /// Academic title, if any.
    #[serde(default)]
    pub title: Option<String>,
    /// Full name.
    pub name: String,
    /// Email address, if known. Advisors without entered data have none.
    #[serde(default)]
    pub email: Option<String>,
}

/// One row of a search result: a person plus everything they are connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// The person this row describes.
    pub person: PersonInfo,
    /// Research interests.
    #[serde(default)]
    pub interests: Vec<Entity>,
    /// Institutes the person is a member of.
    #[serde(default)]
    pub institutes: Vec<Entity>,
    /// Faculties the person is a member of.
    #[serde(default)]
    pub faculties: Vec<Entity>,
    /// Departments the person is a member of.
    #[serde(default)]
    pub departments: Vec<Entity>,
    /// The person's advisors.
    #[serde(default)]
    pub advisors: Vec<Entity>,
    /// Roles held.
    #[serde(default)]
    pub roles: Vec<Entity>,
    /// Expertise offered.
    #[serde(default)]
    pub offered: Vec<Entity>,
    /// Expertise wanted.
    #[serde(default)]
    pub wanted: Vec<Entity>,
}

impl PersonRecord {
    /// Creates a record for a person with no connections.
    pub fn new(pk: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            person: PersonInfo {
                pk: pk.into(),
                title: None,
                name: name.into(),
                email: None,
            },
            interests: Vec::new(),
            institutes: Vec::new(),
            faculties: Vec::new(),
            departments: Vec::new(),
            advisors: Vec::new(),
            roles: Vec::new(),
            offered: Vec::new(),
            wanted: Vec::new(),
        }
    }

    /// Name prefixed with the title when one is set.
    pub fn display_name(&self) -> String {
        match self.person.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => format!("{title} {}", self.person.name),
            _ => self.person.name.clone(),
        }
    }

    /// The related nodes for a category.
    ///
    /// [`Category::Person`] and [`Category::Search`] have no related list and return an empty
    /// slice; use [`Self::keys`] to include the person's own key.
    pub fn related(&self, category: Category) -> &[Entity] {
        match category {
            Category::Interest => &self.interests,
            Category::Institute => &self.institutes,
            Category::Faculty => &self.faculties,
            Category::Department => &self.departments,
            Category::Advisor => &self.advisors,
            Category::Role => &self.roles,
            Category::Offered => &self.offered,
            Category::Wanted => &self.wanted,
            Category::Person | Category::Search => &[],
        }
    }

    /// Primary keys this record holds for a category.
    pub fn keys(&self, category: Category) -> Vec<&str> {
        match category {
            Category::Person => vec![self.person.pk.as_str()],
            Category::Search => Vec::new(),
            other => self.related(other).iter().map(|e| e.pk.as_str()).collect(),
        }
    }

    /// Names of the related nodes for a category, joined for table display.
    pub fn joined_names(&self, category: Category) -> String {
        self.related(category)
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_endpoint_row() {
        let json = r#"{
            "person": {"pk": "a1", "title": "Dr.", "name": "Jana Schuster", "email": "jana@example.org"},
            "interests": [{"pk": 3, "name": "NLP"}],
            "institutes": [{"pk": "4", "name": "TU Dresden"}],
            "advisors": [{"pk": "5", "name": "Prof. Hagel"}]
        }"#;
        let record: PersonRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.person.pk, "a1");
        assert_eq!(record.interests, vec![Entity::new("3", "NLP")]);
        assert_eq!(record.keys(Category::Advisor), vec!["5"]);
        assert!(record.roles.is_empty());
    }

    #[test]
    fn null_title_and_email_are_accepted() {
        let json = r#"{"person": {"pk": 1, "title": null, "name": "Max Muster", "email": null}}"#;
        let record: PersonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_name(), "Max Muster");
        assert_eq!(record.person.email, None);
    }

    #[test]
    fn display_name_prefixes_title() {
        let mut record = PersonRecord::new("1", "Hagel");
        record.person.title = Some("Prof.".into());
        assert_eq!(record.display_name(), "Prof. Hagel");

        record.person.title = Some(String::new());
        assert_eq!(record.display_name(), "Hagel");
    }

    #[test]
    fn keys_include_person_pk() {
        let record = PersonRecord::new("9", "Max");
        assert_eq!(record.keys(Category::Person), vec!["9"]);
        assert!(record.keys(Category::Search).is_empty());
    }

    #[test]
    fn joined_names_for_table_cells() {
        let mut record = PersonRecord::new("1", "Max");
        record.roles = vec![Entity::new("1", "Programmer"), Entity::new("2", "Tutor")];
        assert_eq!(record.joined_names(Category::Role), "Programmer, Tutor");
        assert_eq!(record.joined_names(Category::Faculty), "");
    }
}
