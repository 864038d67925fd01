//! News feed for product releases and discontinuations.

use crate::ids::NewsId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of event a news item reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsKind {
    /// A game or platform reached the market.
    ProductReleased,
    /// A game or platform left the market.
    ProductDiscontinued,
}

impl NewsKind {
    /// Stable wire name of the event type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductReleased => "PRODUCT_RELEASED",
            Self::ProductDiscontinued => "PRODUCT_DISCONTINUED",
        }
    }
}

/// One published news item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: NewsId,
    /// Name of the product the news is about.
    pub name: String,
    pub content: Option<String>,
    pub date: NaiveDateTime,
    pub seen: bool,
    pub kind: NewsKind,
}

impl News {
    /// Untranslated one-line headline.
    pub fn headline(&self) -> String {
        match self.kind {
            NewsKind::ProductReleased => format!("{} has been released", self.name),
            NewsKind::ProductDiscontinued => format!("{} has been discontinued", self.name),
        }
    }
}

/// Append-only news log.
#[derive(Clone, Debug, Default)]
pub struct NewsLog {
    items: Vec<News>,
    next_id: u64,
}

impl NewsLog {
    /// Rebuild a log from saved items.
    pub fn from_items(items: Vec<News>) -> Self {
        let next_id = items.len() as u64;
        Self { items, next_id }
    }

    /// Publish a news event about `subject`.
    pub fn publish(&mut self, subject: &str, date: NaiveDateTime, kind: NewsKind) -> &News {
        let id = NewsId(format!("news-{}", self.next_id));
        self.next_id += 1;
        self.items.push(News {
            id,
            name: subject.to_string(),
            content: None,
            date,
            seen: false,
            kind,
        });
        &self.items[self.items.len() - 1]
    }

    pub fn items(&self) -> &[News] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items about `subject` with the given kind.
    pub fn count_for(&self, subject: &str, kind: NewsKind) -> usize {
        self.items
            .iter()
            .filter(|n| n.name == subject && n.kind == kind)
            .count()
    }

    pub fn mark_all_seen(&mut self) {
        for n in &mut self.items {
            n.seen = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn publish_assigns_sequential_ids() {
        let date = NaiveDate::from_ymd_opt(1978, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut log = NewsLog::default();
        log.publish("Vector One", date, NewsKind::ProductReleased);
        let n = log.publish("Vector One", date, NewsKind::ProductDiscontinued);
        assert_eq!(n.id.as_str(), "news-1");
        assert_eq!(n.headline(), "Vector One has been discontinued");
        assert_eq!(log.count_for("Vector One", NewsKind::ProductReleased), 1);
        log.mark_all_seen();
        assert!(log.items().iter().all(|n| n.seen));
    }
}
