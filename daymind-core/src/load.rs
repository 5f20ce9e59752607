//! Mental load scoring: a normalized 0-10 burden estimate for one day's items,
//! its discrete level, and overload diagnostics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::schedule::{ItemKind, ScheduleItem};
use crate::task::{Category, Priority};

pub const MAX_SCORE: f64 = 10.0;

/// Category weights, priority multipliers and the normalisation constant.
///
/// Immutable once handed to a `LoadScorer`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadWeights {
    pub work: f64,
    pub study: f64,
    pub household: f64,
    pub personal: f64,
    pub sport: f64,
    pub social: f64,
    pub leisure: f64,
    pub rest: f64,

    pub urgent: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,

    /// Weighted hours that map to a score of 10.
    pub max_productive_hours: f64,
}

impl Default for LoadWeights {
    fn default() -> Self {
        Self {
            work: 1.5,
            study: 1.4,
            household: 1.0,
            personal: 0.9,
            sport: 0.8,
            social: 0.6,
            leisure: 0.5,
            rest: 0.2,
            urgent: 1.3,
            high: 1.2,
            medium: 1.0,
            low: 0.8,
            max_productive_hours: 12.0,
        }
    }
}

impl LoadWeights {
    pub fn category_weight(&self, category: Category) -> f64 {
        match category {
            Category::Work => self.work,
            Category::Study => self.study,
            Category::Household => self.household,
            Category::Personal => self.personal,
            Category::Sport => self.sport,
            Category::Social => self.social,
            Category::Leisure => self.leisure,
            Category::Rest => self.rest,
        }
    }

    pub fn priority_multiplier(&self, priority: Priority) -> f64 {
        match priority {
            Priority::Urgent => self.urgent,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    /// Every weight finite and non-negative, `max_productive_hours` positive.
    /// Anything else would push the score outside 0-10 or make it NaN.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("work", self.work),
            ("study", self.study),
            ("household", self.household),
            ("personal", self.personal),
            ("sport", self.sport),
            ("social", self.social),
            ("leisure", self.leisure),
            ("rest", self.rest),
            ("urgent", self.urgent),
            ("high", self.high),
            ("medium", self.medium),
            ("low", self.low),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidWeights(format!(
                    "{name} must be a finite number >= 0, got {value}"
                )));
            }
        }

        let max = self.max_productive_hours;
        if !max.is_finite() || max <= 0.0 {
            return Err(CoreError::InvalidWeights(format!(
                "max_productive_hours must be a finite number > 0, got {max}"
            )));
        }
        Ok(())
    }
}

/// Strictly ordered load classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    Light,
    Balanced,
    Busy,
    Overloaded,
    Critical,
}

impl LoadLevel {
    pub fn message(self) -> &'static str {
        match self {
            LoadLevel::Light => {
                "Very light day. There is room to add activities or enjoy some free time."
            }
            LoadLevel::Balanced => "Balanced day. Good mix of activity and rest.",
            LoadLevel::Busy => "Busy but manageable day. Make sure to take your breaks.",
            LoadLevel::Overloaded => {
                "Careful, this day is overloaded. Consider postponing some tasks."
            }
            LoadLevel::Critical => "Critical overload! This day really needs to be lightened.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoadLevel::Light => "light",
            LoadLevel::Balanced => "balanced",
            LoadLevel::Busy => "busy",
            LoadLevel::Overloaded => "overloaded",
            LoadLevel::Critical => "critical",
        }
    }
}

/// Inclusive upper bounds: <=3 light, <=5 balanced, <=7 busy, <=9 overloaded.
pub fn mental_load_level(score: f64) -> LoadLevel {
    if score <= 3.0 {
        LoadLevel::Light
    } else if score <= 5.0 {
        LoadLevel::Balanced
    } else if score <= 7.0 {
        LoadLevel::Busy
    } else if score <= 9.0 {
        LoadLevel::Overloaded
    } else {
        LoadLevel::Critical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Postpone,
    Shorten,
    Breaks,
    Reschedule,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Postpone => "postpone",
            SuggestionKind::Shorten => "shorten",
            SuggestionKind::Breaks => "breaks",
            SuggestionKind::Reschedule => "reschedule",
        }
    }
}

/// A mitigation hint. `impact` is an advisory score delta, never applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub impact: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
}

/// Minutes spent in one category. `category` is `None` for items with no
/// known category (manual TASK items without an embedded task).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Option<Category>,
    pub minutes: f64,
    /// Rounded share of the counted total, 0 when the total is 0.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalLoadResult {
    pub score: f64,
    pub level: LoadLevel,
    pub message: String,
    pub suggestions: Vec<Suggestion>,
    pub distribution: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadScorer {
    weights: LoadWeights,
}

impl LoadScorer {
    /// Fails when `weights` would break the 0-10 score range.
    pub fn new(weights: LoadWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Weighted hours of load-bearing items, normalised to 0-10 with one decimal.
    pub fn calculate_mental_load(&self, items: &[ScheduleItem]) -> f64 {
        if items.is_empty() {
            return 0.0;
        }

        let weighted_hours: f64 = items
            .iter()
            .filter(|i| i.kind.counts_toward_load())
            .map(|item| {
                let hours = (item.end_time - item.start_time).num_seconds() as f64 / 3600.0;
                let (category, multiplier) = match item.task_summary() {
                    Some(task) => (task.category, self.weights.priority_multiplier(task.priority)),
                    None => (infer_category(&item.title), 1.0),
                };
                hours * self.weights.category_weight(category) * multiplier
            })
            .sum();

        let score = weighted_hours / self.weights.max_productive_hours * MAX_SCORE;
        ((score * 10.0).round() / 10.0).min(MAX_SCORE)
    }

    pub fn analyze_mental_load(&self, score: f64, items: &[ScheduleItem]) -> MentalLoadResult {
        let level = mental_load_level(score);
        let suggestions = if score > 7.0 {
            generate_overload_suggestions(score, items)
        } else {
            Vec::new()
        };

        MentalLoadResult {
            score,
            level,
            message: level.message().to_string(),
            suggestions,
            distribution: calculate_time_distribution(items),
        }
    }

    /// Score and analyse in one go.
    pub fn evaluate(&self, items: &[ScheduleItem]) -> MentalLoadResult {
        let score = self.calculate_mental_load(items);
        self.analyze_mental_load(score, items)
    }
}

/// Category guess for items without an embedded task.
fn infer_category(title: &str) -> Category {
    let title = title.to_lowercase();
    if title.contains("repos") || title.contains("rest") {
        Category::Rest
    } else if title.contains("sport") || title.contains("exercise") {
        Category::Sport
    } else if title.contains("loisir") || title.contains("leisure") {
        Category::Leisure
    } else {
        Category::Work
    }
}

/// Minutes and share per category for every item except BREAK/BUFFER/SLEEP.
/// LUNCH counts as REST. Time is summed in seconds, so partial minutes count.
pub fn calculate_time_distribution(items: &[ScheduleItem]) -> Vec<CategoryShare> {
    let mut seconds_by: BTreeMap<Option<Category>, i64> = BTreeMap::new();
    let mut total = 0_i64;

    for item in items.iter().filter(|i| !i.kind.is_filler()) {
        let category = match (&item.kind, item.task_summary()) {
            (_, Some(task)) => Some(task.category),
            (ItemKind::Lunch, None) => Some(Category::Rest),
            _ => None,
        };
        let seconds = (item.end_time - item.start_time).num_seconds();
        *seconds_by.entry(category).or_default() += seconds;
        total += seconds;
    }

    seconds_by
        .into_iter()
        .map(|(category, seconds)| CategoryShare {
            category,
            minutes: seconds as f64 / 60.0,
            percentage: if total > 0 {
                (seconds as f64 / total as f64 * 100.0).round().max(0.0) as u32
            } else {
                0
            },
        })
        .collect()
}

/// Mitigations for a heavy day, in a fixed order: postpone, shorten, breaks,
/// reschedule. All applicable ones are returned.
pub fn generate_overload_suggestions(score: f64, items: &[ScheduleItem]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let task_summaries: Vec<_> = items.iter().filter_map(|i| i.task_summary()).collect();
    let low: Vec<String> = task_summaries
        .iter()
        .filter(|t| t.priority == Priority::Low)
        .map(|t| t.title.clone())
        .collect();
    let has_medium = task_summaries.iter().any(|t| t.priority == Priority::Medium);

    if !low.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Postpone,
            message: format!("Postpone {} low-priority task(s) to tomorrow", low.len()),
            impact: -0.5 * low.len() as f64,
            tasks: low,
        });
    }

    if has_medium && score > 8.0 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Shorten,
            message: "Shorten medium-priority tasks by 20%".to_string(),
            impact: -0.8,
            tasks: Vec::new(),
        });
    }

    let breaks = items.iter().filter(|i| i.kind == ItemKind::Break).count();
    if breaks < 3 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Breaks,
            message: "Add more breaks to recover".to_string(),
            impact: -0.3,
            tasks: Vec::new(),
        });
    }

    if score > 9.0 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Reschedule,
            message: "Move at least one important task to tomorrow".to_string(),
            impact: -1.5,
            tasks: Vec::new(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn task_item(
        title: &str,
        category: Category,
        priority: Priority,
        from: u32,
        to: u32,
    ) -> ScheduleItem {
        let task = Task::new(title, title)
            .with_category(category)
            .with_priority(priority);
        ScheduleItem::for_task(&task, at(from, 0), at(to, 0))
    }

    fn manual(title: &str, from: u32, to: u32) -> ScheduleItem {
        ScheduleItem::new(
            title,
            ItemKind::Task {
                task_id: None,
                task: None,
            },
            at(from, 0),
            at(to, 0),
        )
    }

    #[test]
    fn empty_schedule_scores_zero() {
        assert_eq!(LoadScorer::default().calculate_mental_load(&[]), 0.0);
    }

    #[test]
    fn four_hours_of_medium_work() {
        // 4h * 1.5 * 1.0 = 6 weighted hours -> 5.0
        let items = vec![task_item("w", Category::Work, Priority::Medium, 8, 12)];
        assert_eq!(LoadScorer::default().calculate_mental_load(&items), 5.0);
    }

    #[test]
    fn priority_multiplier_applies_only_with_task() {
        // 3h * 1.5 * 1.3 = 5.85 -> 4.875 -> 4.9
        let urgent = vec![task_item("u", Category::Work, Priority::Urgent, 8, 11)];
        assert_eq!(LoadScorer::default().calculate_mental_load(&urgent), 4.9);

        // Manual item defaults to WORK with multiplier 1.0: 2h * 1.5 = 3 -> 2.5
        let bare = vec![manual("Client call", 8, 10)];
        assert_eq!(LoadScorer::default().calculate_mental_load(&bare), 2.5);
    }

    #[test]
    fn title_keywords_pick_a_category() {
        assert_eq!(infer_category("Afternoon REST"), Category::Rest);
        assert_eq!(infer_category("Temps de repos"), Category::Rest);
        assert_eq!(infer_category("Morning exercise"), Category::Sport);
        assert_eq!(infer_category("Sport club"), Category::Sport);
        assert_eq!(infer_category("Loisir"), Category::Leisure);
        assert_eq!(infer_category("Leisure time"), Category::Leisure);
        assert_eq!(infer_category("Meeting"), Category::Work);

        // 6h rest at 0.2 = 1.2 -> 1.0
        let items = vec![manual("Rest", 8, 14)];
        assert_eq!(LoadScorer::default().calculate_mental_load(&items), 1.0);
    }

    #[test]
    fn score_is_capped_at_ten() {
        let items = vec![task_item("w", Category::Work, Priority::Urgent, 6, 22)];
        assert_eq!(LoadScorer::default().calculate_mental_load(&items), 10.0);
    }

    #[test]
    fn recovery_items_do_not_count() {
        let scorer = LoadScorer::default();
        let base = vec![task_item("w", Category::Study, Priority::High, 8, 11)];
        let before = scorer.calculate_mental_load(&base);

        let mut padded = base.clone();
        padded.push(ScheduleItem::new("Break", ItemKind::Break, at(11, 0), at(12, 0)));
        padded.push(ScheduleItem::new("Lunch break", ItemKind::Lunch, at(12, 0), at(13, 0)));
        padded.push(ScheduleItem::new("Transition", ItemKind::Buffer, at(13, 0), at(14, 0)));
        padded.push(ScheduleItem::new("Night", ItemKind::Sleep, at(0, 0), at(6, 0)));

        assert_eq!(scorer.calculate_mental_load(&padded), before);
    }

    #[test]
    fn injected_weights_change_the_score() {
        let weights = LoadWeights {
            work: 1.0,
            ..LoadWeights::default()
        };
        let items = vec![task_item("w", Category::Work, Priority::Medium, 8, 14)];
        assert_eq!(LoadScorer::new(weights).unwrap().calculate_mental_load(&items), 5.0);
    }

    #[test]
    fn weights_that_break_the_score_range_are_rejected() {
        let zero_max = LoadWeights {
            max_productive_hours: 0.0,
            ..LoadWeights::default()
        };
        let negative = LoadWeights {
            work: -3.0,
            ..LoadWeights::default()
        };
        let nan = LoadWeights {
            low: f64::NAN,
            ..LoadWeights::default()
        };
        let infinite = LoadWeights {
            max_productive_hours: f64::INFINITY,
            ..LoadWeights::default()
        };

        for weights in [zero_max, negative, nan, infinite] {
            assert!(matches!(
                LoadScorer::new(weights),
                Err(CoreError::InvalidWeights(_))
            ));
        }

        let all_zero_categories = LoadWeights {
            work: 0.0,
            rest: 0.0,
            ..LoadWeights::default()
        };
        assert!(LoadScorer::new(all_zero_categories).is_ok());
        assert!(LoadWeights::default().validate().is_ok());
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(mental_load_level(0.0), LoadLevel::Light);
        assert_eq!(mental_load_level(3.0), LoadLevel::Light);
        assert_eq!(mental_load_level(3.01), LoadLevel::Balanced);
        assert_eq!(mental_load_level(5.0), LoadLevel::Balanced);
        assert_eq!(mental_load_level(5.01), LoadLevel::Busy);
        assert_eq!(mental_load_level(7.0), LoadLevel::Busy);
        assert_eq!(mental_load_level(7.01), LoadLevel::Overloaded);
        assert_eq!(mental_load_level(9.0), LoadLevel::Overloaded);
        assert_eq!(mental_load_level(9.01), LoadLevel::Critical);
        assert!(LoadLevel::Light < LoadLevel::Critical);
    }

    #[test]
    fn postpone_lists_low_priority_titles() {
        let items = vec![
            task_item("Tidy desk", Category::Household, Priority::Low, 8, 9),
            task_item("Ship release", Category::Work, Priority::Urgent, 9, 12),
        ];
        let suggestions = generate_overload_suggestions(7.5, &items);
        assert_eq!(suggestions[0].kind, SuggestionKind::Postpone);
        assert_eq!(suggestions[0].tasks, vec!["Tidy desk".to_string()]);
        assert_eq!(suggestions[0].impact, -0.5);
    }

    #[test]
    fn suggestions_are_ordered_and_cumulative() {
        let items = vec![
            task_item("a", Category::Work, Priority::Low, 7, 8),
            task_item("b", Category::Work, Priority::Low, 8, 9),
            task_item("c", Category::Work, Priority::Medium, 9, 12),
        ];
        let kinds: Vec<SuggestionKind> = generate_overload_suggestions(9.5, &items)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::Postpone,
                SuggestionKind::Shorten,
                SuggestionKind::Breaks,
                SuggestionKind::Reschedule
            ]
        );

        let postpone = &generate_overload_suggestions(9.5, &items)[0];
        assert_eq!(postpone.impact, -1.0);
    }

    #[test]
    fn enough_breaks_and_moderate_score_yield_nothing() {
        let mut items = vec![task_item("c", Category::Work, Priority::Medium, 7, 8)];
        for h in 8..11 {
            items.push(ScheduleItem::new("Break", ItemKind::Break, at(h, 0), at(h, 15)));
        }
        // MEDIUM present but score <= 8: no shorten.
        assert!(generate_overload_suggestions(7.5, &items).is_empty());
    }

    #[test]
    fn analysis_only_suggests_when_busy() {
        let scorer = LoadScorer::default();
        let items = vec![task_item("w", Category::Work, Priority::Low, 8, 9)];

        let calm = scorer.analyze_mental_load(6.0, &items);
        assert_eq!(calm.level, LoadLevel::Busy);
        assert!(calm.suggestions.is_empty());
        assert_eq!(calm.message, LoadLevel::Busy.message());

        let heavy = scorer.analyze_mental_load(8.0, &items);
        assert_eq!(heavy.level, LoadLevel::Overloaded);
        assert!(!heavy.suggestions.is_empty());
    }

    #[test]
    fn distribution_buckets_and_percentages() {
        let items = vec![
            task_item("w", Category::Work, Priority::Medium, 8, 11),
            ScheduleItem::new("Lunch break", ItemKind::Lunch, at(12, 0), at(13, 0)),
            ScheduleItem::new("Break", ItemKind::Break, at(11, 0), at(11, 15)),
            manual("Errand", 14, 16),
        ];
        let dist = calculate_time_distribution(&items);

        let work = dist.iter().find(|s| s.category == Some(Category::Work)).unwrap();
        assert_eq!(work.minutes, 180.0);
        assert_eq!(work.percentage, 50);

        let rest = dist.iter().find(|s| s.category == Some(Category::Rest)).unwrap();
        assert_eq!(rest.minutes, 60.0);
        assert_eq!(rest.percentage, 17);

        let other = dist.iter().find(|s| s.category.is_none()).unwrap();
        assert_eq!(other.minutes, 120.0);
        assert_eq!(other.percentage, 33);

        let sum: u32 = dist.iter().map(|s| s.percentage).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn distribution_of_nothing_is_empty() {
        assert!(calculate_time_distribution(&[]).is_empty());
        let only_breaks = vec![ScheduleItem::new("Break", ItemKind::Break, at(9, 0), at(9, 15))];
        assert!(calculate_time_distribution(&only_breaks).is_empty());
    }

    #[test]
    fn distribution_keeps_partial_minutes() {
        let short = ScheduleItem::new(
            "Call",
            ItemKind::Task {
                task_id: None,
                task: None,
            },
            at(9, 0),
            at(9, 0) + chrono::Duration::seconds(90),
        );
        let lunch = ScheduleItem::new("Lunch break", ItemKind::Lunch, at(12, 0), at(12, 1));
        let dist = calculate_time_distribution(&[short, lunch]);

        let other = dist.iter().find(|s| s.category.is_none()).unwrap();
        assert_eq!(other.minutes, 1.5);
        assert_eq!(other.percentage, 60);

        let rest = dist.iter().find(|s| s.category == Some(Category::Rest)).unwrap();
        assert_eq!(rest.minutes, 1.0);
        assert_eq!(rest.percentage, 40);
    }
}
