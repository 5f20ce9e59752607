use daymind_core::{Allocation, CategoryShare, MentalLoadResult, ScheduleItem};

pub fn render_timeline(items: &[ScheduleItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{}-{}  {:<6}  {}",
            item.start_time.format("%H:%M"),
            item.end_time.format("%H:%M"),
            item.kind.as_str(),
            item.title
        ));
        if let Some(task) = item.task_summary() {
            out.push_str(&format!(" [{}/{}]", task.category.as_str(), task.priority.as_str()));
        }
        out.push('\n');
    }
    out
}

pub fn render_plan(allocation: &Allocation) -> String {
    let mut out = String::from("## Plan\n");
    out.push_str(&render_timeline(&allocation.items));

    if !allocation.omitted.is_empty() {
        out.push_str("\n## Not scheduled\n");
        for id in &allocation.omitted {
            out.push_str(&format!("- {id}\n"));
        }
    }
    out
}

fn share_label(share: &CategoryShare) -> &'static str {
    share.category.map(|c| c.as_str()).unwrap_or("OTHER")
}

pub fn render_load(result: &MentalLoadResult) -> String {
    let mut out = String::from("## Mental load\n");
    out.push_str(&format!(
        "score: {:.1}/10 ({})\n{}\n",
        result.score,
        result.level.as_str(),
        result.message
    ));

    if !result.suggestions.is_empty() {
        out.push_str("\n## Suggestions\n");
        for s in &result.suggestions {
            out.push_str(&format!(
                "- [{}] {} (impact {:+.1})\n",
                s.kind.as_str(),
                s.message,
                s.impact
            ));
            if !s.tasks.is_empty() {
                out.push_str(&format!("  tasks: {}\n", s.tasks.join(", ")));
            }
        }
    }

    if !result.distribution.is_empty() {
        out.push_str("\n## Time by category\n");
        for share in &result.distribution {
            out.push_str(&format!(
                "{:<10} {:>4} min  {:>3}%\n",
                share_label(share),
                share.minutes,
                share.percentage
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daymind_core::{Category, ItemKind, LoadScorer, Priority, Task};

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn timeline_shows_kind_and_task_tags() {
        let task = Task::new("t1", "Deep work")
            .with_category(Category::Study)
            .with_priority(Priority::High);
        let items = vec![
            ScheduleItem::for_task(&task, at(7, 0), at(8, 30)),
            ScheduleItem::new("Lunch break", ItemKind::Lunch, at(12, 0), at(13, 0)),
        ];
        let s = render_timeline(&items);
        assert!(s.contains("07:00-08:30  TASK    Deep work [STUDY/HIGH]"));
        assert!(s.contains("12:00-13:00  LUNCH   Lunch break\n"));
    }

    #[test]
    fn plan_lists_omitted_tasks() {
        let allocation = Allocation {
            items: vec![],
            omitted: vec!["big".to_string()],
        };
        let s = render_plan(&allocation);
        assert!(s.contains("## Not scheduled\n- big\n"));
    }

    #[test]
    fn load_section_includes_distribution() {
        let items = vec![ScheduleItem::new("Lunch break", ItemKind::Lunch, at(12, 0), at(13, 0))];
        let result = LoadScorer::default().evaluate(&items);
        let s = render_load(&result);
        assert!(s.starts_with("## Mental load\nscore: 0.0/10 (light)\n"));
        assert!(s.contains("REST"));
        assert!(!s.contains("## Suggestions"));
    }
}
