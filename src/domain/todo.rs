use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date-time layout of `createdAt`/`modifiedAt`: RFC 1123 with a numeric zone.
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self { Self(value) }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// One stored record, in the field layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub category: String,
    #[serde(with = "progress_string")]
    pub progress: i64,
    pub content: String,
    pub user_id: String,
    pub created_at: String,
    pub modified_at: String,
}

/// The part of a POSTed body the server honours. Everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpsertTodo {
    pub id: TodoId,
    pub title: String,
    pub category: String,
    #[serde(with = "progress_string")]
    pub progress: i64,
    pub content: String,
}

impl Todo {
    /// A new record under a freshly generated id, stamped `now` twice.
    pub fn create(input: UpsertTodo, now: &str) -> Self {
        Self {
            id: TodoId::generate(),
            title: input.title,
            category: input.category,
            progress: input.progress,
            content: input.content,
            user_id: String::new(),
            created_at: now.to_owned(),
            modified_at: now.to_owned(),
        }
    }

    /// Overwrites the editable fields; `id` and `created_at` stay.
    pub fn apply(&mut self, input: UpsertTodo, now: &str) {
        self.title = input.title;
        self.category = input.category;
        self.progress = input.progress;
        self.content = input.content;
        self.modified_at = now.to_owned();
    }
}

/// `keyword` / `category` query of the list endpoint. Empty means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub keyword: String,
    pub category: String,
}

impl TodoFilter {
    /// Picks the first `keyword` and first `category` out of raw query
    /// pairs; repeats and unknown keys are ignored.
    pub fn from_query<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut keyword = None;
        let mut category = None;
        for (key, value) in pairs {
            match key.as_str() {
                "keyword" => { keyword.get_or_insert(value); }
                "category" => { category.get_or_insert(value); }
                _ => {}
            }
        }
        Self { keyword: keyword.unwrap_or_default(), category: category.unwrap_or_default() }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.matches_keyword(todo) && self.matches_category(todo)
    }

    fn matches_keyword(&self, todo: &Todo) -> bool {
        self.keyword.is_empty() || todo.title.contains(&self.keyword) || todo.content.contains(&self.keyword)
    }

    fn matches_category(&self, todo: &Todo) -> bool {
        self.category.is_empty() || todo.category == self.category
    }
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn timestamp_now() -> String { format_timestamp(&Local::now()) }

// Progress travels as a numeric string; a bare number is accepted on input too.
mod progress_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw { Text(String), Number(i64) }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
            Raw::Number(n) => Ok(n),
        }
    }
}
