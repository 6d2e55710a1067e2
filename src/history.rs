use crate::errors::StorageError;
use crate::models::{HistoryEntry, Sentiment};
use crate::storage::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

pub const HISTORY_KEY: &str = "sentimentHistory";
pub const HISTORY_CAPACITY: usize = 10;
pub const EMPTY_HISTORY_TEXT: &str = "No recent analysis";

/// Newest-first, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    fn from_persisted(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderableEntry {
    Entry {
        index: usize,
        /// Already escaped for markup.
        text: String,
        sentiment: Sentiment,
    },
    Placeholder {
        text: &'static str,
    },
}

pub struct HistoryStore<S> {
    storage: S,
    log: HistoryLog,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Builds the store and loads whatever was persisted under [`HISTORY_KEY`].
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            log: HistoryLog::default(),
        };
        store.load();
        store
    }

    pub fn load(&mut self) -> &HistoryLog {
        self.log = match self.storage.get(HISTORY_KEY) {
            None => HistoryLog::default(),
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => HistoryLog::from_persisted(entries),
                Err(err) => {
                    warn!("discarding unreadable history: {err}");
                    HistoryLog::default()
                }
            },
        };
        &self.log
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    pub fn append(&mut self, text: &str, sentiment: Sentiment) -> &HistoryLog {
        self.append_at(text, sentiment, Utc::now())
    }

    pub fn append_at(&mut self, text: &str, sentiment: Sentiment, at: DateTime<Utc>) -> &HistoryLog {
        self.log.push_front(HistoryEntry {
            text: text.to_string(),
            sentiment,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        self.persist();
        &self.log
    }

    pub fn clear(&mut self) -> &HistoryLog {
        self.log = HistoryLog::default();
        if let Err(err) = self.storage.remove(HISTORY_KEY) {
            warn!("failed to remove persisted history: {err}");
        }
        &self.log
    }

    fn persist(&self) {
        let result = serde_json::to_string(self.log.entries())
            .map_err(StorageError::from)
            .and_then(|payload| self.storage.set(HISTORY_KEY, &payload));
        if let Err(err) = result {
            warn!("failed to persist history: {err}");
        }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

pub fn render(log: &HistoryLog) -> Vec<RenderableEntry> {
    if log.is_empty() {
        return vec![RenderableEntry::Placeholder {
            text: EMPTY_HISTORY_TEXT,
        }];
    }

    log.entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| RenderableEntry::Entry {
            index,
            text: escape_html(&entry.text),
            sentiment: entry.sentiment,
        })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn instant(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, second).unwrap()
    }

    #[test]
    fn starts_empty_without_persisted_state() {
        let store = HistoryStore::new(MemoryStore::new());
        assert!(store.log().is_empty());
        assert_eq!(
            render(store.log()),
            vec![RenderableEntry::Placeholder {
                text: "No recent analysis"
            }]
        );
    }

    #[test]
    fn eleventh_append_evicts_the_oldest() {
        let mut store = HistoryStore::new(MemoryStore::new());
        for i in 0..=HISTORY_CAPACITY {
            store.append_at(&format!("entry {i}"), Sentiment::Neutral, instant(i as u32));
        }

        let log = store.log();
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.entries()[0].text, "entry 10");
        assert_eq!(log.entries()[HISTORY_CAPACITY - 1].text, "entry 1");
        assert!(log.entries().iter().all(|entry| entry.text != "entry 0"));
    }

    #[test]
    fn append_persists_newest_first_with_iso_timestamp() {
        let storage = MemoryStore::new();
        let mut store = HistoryStore::new(storage.clone());
        store.append_at("first", Sentiment::Negative, instant(1));
        store.append_at("second", Sentiment::Positive, instant(2));

        let raw = storage.get(HISTORY_KEY).expect("history persisted");
        let persisted: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted[0].text, "second");
        assert_eq!(persisted[0].timestamp, "2026-10-19T08:30:02.000Z");
        assert_eq!(persisted[1].sentiment, Sentiment::Negative);

        let reloaded = HistoryStore::new(store.into_storage());
        assert_eq!(reloaded.log().entries(), persisted.as_slice());
    }

    #[test]
    fn corrupted_state_loads_as_empty() {
        let storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "[{\"text\": 42}").unwrap();
        let mut store = HistoryStore::new(storage.clone());
        assert!(store.load().is_empty());

        storage
            .set(
                HISTORY_KEY,
                r#"[{"text":"hi","sentiment":"furious","timestamp":"2026-01-01T00:00:00.000Z"}]"#,
            )
            .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn oversized_persisted_log_is_truncated() {
        let entries: Vec<HistoryEntry> = (0..15)
            .map(|i| HistoryEntry {
                text: format!("t{i}"),
                sentiment: Sentiment::Positive,
                timestamp: "2026-01-01T00:00:00.000Z".into(),
            })
            .collect();
        let storage = MemoryStore::new();
        storage
            .set(HISTORY_KEY, &serde_json::to_string(&entries).unwrap())
            .unwrap();

        let store = HistoryStore::new(storage);
        assert_eq!(store.log().len(), HISTORY_CAPACITY);
        assert_eq!(store.log().entries()[0].text, "t0");
    }

    #[test]
    fn clear_removes_persisted_state() {
        let storage = MemoryStore::new();
        let mut store = HistoryStore::new(storage.clone());
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            store.append_at(text, Sentiment::Neutral, instant(i as u32));
        }
        assert_eq!(store.log().len(), 3);

        assert!(store.clear().is_empty());
        assert_eq!(storage.get(HISTORY_KEY), None);

        let mut reloaded = HistoryStore::new(store.into_storage());
        assert!(reloaded.load().is_empty());
    }

    #[test]
    fn rows_render_markup_literally() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append_at(
            "<script>alert(\"x\")</script> & 'co'",
            Sentiment::Negative,
            instant(0),
        );

        let rows = render(store.log());
        assert_eq!(
            rows,
            vec![RenderableEntry::Entry {
                index: 0,
                text: "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;co&#39;"
                    .into(),
                sentiment: Sentiment::Negative,
            }]
        );
        assert_eq!(store.log().entries()[0].text, "<script>alert(\"x\")</script> & 'co'");
    }
}
