//! News cards, category filtering, and related-news selection.

use chrono::{DateTime, Utc};

use super::format::format_time_ago;
use super::{NodeId, NodeIds};
use crate::models::NewsArticle;
use crate::routes::Link;

/// Filter value that matches every article.
pub const ALL_CATEGORY: &str = "all";

/// Filter choices offered on the landing page, in display order.
pub const NEWS_CATEGORIES: [&str; 11] = [
    ALL_CATEGORY,
    "Oil Markets",
    "OPEC",
    "Natural Gas",
    "Refining",
    "International",
    "Inventory",
    "Extraction",
    "Technology",
    "Demand",
    "Supply",
];

/// Shown instead of the grid when a filter matches nothing.
pub const NO_ARTICLES: &str = "No articles in this category.";

const RELATED_MIN_MATCHES: usize = 3;
const RELATED_FALLBACK_LEN: usize = 6;

/// A rendered article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsCard {
    pub id: NodeId,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub source: String,
    pub read_time: String,
    /// Age at render time, e.g. `3h ago`. Not refreshed afterwards.
    pub age: String,
    pub link: Link,
}

impl NewsCard {
    pub fn new(article: &NewsArticle, now: DateTime<Utc>, ids: &mut NodeIds) -> Self {
        Self {
            id: ids.mint(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            category: article.category.clone(),
            source: article.source.clone(),
            read_time: article.read_time.clone(),
            age: format_time_ago(article.published_at, now),
            link: Link::external(article.source_url.as_deref()),
        }
    }
}

/// Articles in `category`, in feed order. [`ALL_CATEGORY`] keeps everything.
pub fn filter_news<'a>(articles: &'a [NewsArticle], category: &str) -> Vec<&'a NewsArticle> {
    articles
        .iter()
        .filter(|a| category == ALL_CATEGORY || a.category == category)
        .collect()
}

pub fn render_news_cards(
    articles: &[&NewsArticle],
    now: DateTime<Utc>,
    ids: &mut NodeIds,
) -> Vec<NewsCard> {
    articles.iter().map(|a| NewsCard::new(a, now, ids)).collect()
}

/// Body of the news section below the featured slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsGrid {
    Cards(Vec<NewsCard>),
    /// Nothing matched; carries the message to show.
    Empty(&'static str),
}

/// The landing page news section: one featured article plus the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSection {
    pub featured: Option<NewsCard>,
    pub grid: NewsGrid,
}

impl NewsSection {
    /// Full render of the section for one category.
    pub fn render(
        articles: &[NewsArticle],
        category: &str,
        now: DateTime<Utc>,
        ids: &mut NodeIds,
    ) -> Self {
        let filtered = filter_news(articles, category);
        let Some((first, rest)) = filtered.split_first() else {
            return Self {
                featured: None,
                grid: NewsGrid::Empty(NO_ARTICLES),
            };
        };

        Self {
            featured: Some(NewsCard::new(first, now, ids)),
            grid: NewsGrid::Cards(render_news_cards(rest, now, ids)),
        }
    }

    /// Cards in display order, featured first.
    pub fn cards(&self) -> impl Iterator<Item = &NewsCard> {
        let grid: &[NewsCard] = match &self.grid {
            NewsGrid::Cards(cards) => cards.as_slice(),
            NewsGrid::Empty(_) => &[],
        };
        self.featured.iter().chain(grid)
    }
}

/// News categories relevant to a commodity.
pub fn related_categories(symbol: &str) -> &'static [&'static str] {
    match symbol {
        "WTI" => &["OPEC", "Supply", "Analysis", "Inventory", "Demand"],
        "BRENT" => &["OPEC", "Geopolitical", "Supply", "Demand"],
        "NATGAS" => &["Natural Gas"],
        "HEATING" | "RBOB" => &["Refining", "Demand", "Inventory"],
        "OPEC" => &["OPEC"],
        "DUBAI" | "MURBAN" => &["OPEC", "Geopolitical"],
        "WCS" => &["Supply"],
        "GASOIL" => &["Refining", "Demand"],
        _ => &[],
    }
}

/// Articles for a commodity's detail page.
///
/// When fewer than three articles fall in the symbol's categories, the
/// first six of the whole feed are used instead.
pub fn select_related_news<'a>(
    articles: &'a [NewsArticle],
    symbol: &str,
) -> Vec<&'a NewsArticle> {
    let categories = related_categories(symbol);
    let related: Vec<_> = articles
        .iter()
        .filter(|a| categories.contains(&a.category.as_str()))
        .collect();

    if related.len() < RELATED_MIN_MATCHES {
        return articles.iter().take(RELATED_FALLBACK_LEN).collect();
    }
    related
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    pub(crate) fn article(id: &str, category: &str) -> NewsArticle {
        NewsArticle {
            id: id.to_string(),
            slug: format!("slug-{id}"),
            title: format!("Title {id}"),
            summary: format!("Summary {id}"),
            content: String::new(),
            source: "Reuters".to_string(),
            source_url: Some(format!("https://example.com/{id}")),
            category: category.to_string(),
            published_at: now() - Duration::hours(2),
            image_url: String::new(),
            read_time: "3 min read".to_string(),
        }
    }

    fn ids_of<'a>(articles: &[&'a NewsArticle]) -> Vec<&'a str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn all_keeps_every_article_in_order() {
        let feed = vec![article("1", "OPEC"), article("2", "Refining"), article("3", "OPEC")];
        assert_eq!(ids_of(&filter_news(&feed, ALL_CATEGORY)), ["1", "2", "3"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let feed = vec![
            article("1", "OPEC"),
            article("2", "OPEC+"),
            article("3", "opec"),
            article("4", "OPEC"),
        ];
        assert_eq!(ids_of(&filter_news(&feed, "OPEC")), ["1", "4"]);
    }

    #[test]
    fn first_match_is_featured() {
        let feed = vec![article("1", "Supply"), article("2", "OPEC"), article("3", "OPEC")];
        let mut ids = NodeIds::new();
        let section = NewsSection::render(&feed, "OPEC", now(), &mut ids);

        let featured = section.featured.as_ref().unwrap();
        assert_eq!(featured.title, "Title 2");
        assert_eq!(featured.age, "2h ago");
        match &section.grid {
            NewsGrid::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].title, "Title 3");
            }
            NewsGrid::Empty(_) => panic!("expected cards"),
        }
        assert_eq!(section.cards().count(), 2);
    }

    #[test]
    fn no_match_renders_placeholder() {
        let feed = vec![article("1", "Supply")];
        let mut ids = NodeIds::new();
        let section = NewsSection::render(&feed, "Technology", now(), &mut ids);

        assert!(section.featured.is_none());
        assert_eq!(section.grid, NewsGrid::Empty(NO_ARTICLES));
        assert_eq!(section.cards().count(), 0);
    }

    #[test]
    fn single_match_has_empty_grid_not_placeholder() {
        let feed = vec![article("1", "Supply")];
        let mut ids = NodeIds::new();
        let section = NewsSection::render(&feed, "Supply", now(), &mut ids);

        assert!(section.featured.is_some());
        assert_eq!(section.grid, NewsGrid::Cards(Vec::new()));
    }

    #[test]
    fn missing_source_url_is_placeholder_link() {
        let mut a = article("1", "OPEC");
        a.source_url = None;
        let mut ids = NodeIds::new();
        let card = NewsCard::new(&a, now(), &mut ids);
        assert_eq!(card.link.href(), "#");
    }

    #[test]
    fn related_news_uses_symbol_categories() {
        let feed = vec![
            article("1", "Refining"),
            article("2", "OPEC"),
            article("3", "Supply"),
            article("4", "Technology"),
            article("5", "Demand"),
        ];
        assert_eq!(ids_of(&select_related_news(&feed, "WTI")), ["2", "3", "5"]);
    }

    #[test]
    fn related_news_falls_back_to_first_six() {
        let feed: Vec<_> = (1..=8).map(|i| article(&i.to_string(), "Technology")).collect();
        let mut with_two = feed.clone();
        with_two[7].category = "Natural Gas".into();
        with_two[6].category = "Natural Gas".into();

        assert_eq!(
            ids_of(&select_related_news(&with_two, "NATGAS")),
            ["1", "2", "3", "4", "5", "6"]
        );
        assert_eq!(select_related_news(&feed, "UNKNOWN").len(), 6);
    }

    #[test]
    fn related_categories_table() {
        assert_eq!(related_categories("RBOB"), related_categories("HEATING"));
        assert_eq!(related_categories("MURBAN"), ["OPEC", "Geopolitical"]);
        assert!(related_categories("XYZ").is_empty());
    }
}
