//! Terminal output for a completed ranking.

use serde::Serialize;
use topsis_engine::{Evaluation, RankOptions};

const RULE_WIDTH: usize = 60;

/// A finished ranking together with the labels needed to present it.
#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub(crate) labels: Vec<String>,
    pub(crate) criteria: Vec<String>,
    pub(crate) options: RankOptions,
    pub(crate) evaluation: Evaluation,
}

impl Report {
    /// Print every intermediate artifact of the evaluation.
    pub(crate) fn print_params(&self) {
        let evaluation = &self.evaluation;

        section("PARAMETERS");
        println!("Missing data:  {}", self.options.missing_data_strategy);
        println!("Metric:        {}", self.options.distance_metric);
        if self.options.distance_metric == topsis_engine::DistanceMetric::Minkowski {
            println!("Minkowski p:   {}", self.options.effective_minkowski_p());
        }
        println!("Reverse rank:  {}", self.options.reverse_rank);

        section("WEIGHTED NORMALIZED MATRIX");
        self.print_header();
        for (label, row) in self.labels.iter().zip(evaluation.normalized.rows()) {
            print_row(label, row.iter().copied());
        }

        section("IDEAL SOLUTIONS");
        self.print_header();
        print_row("best", evaluation.ideal.best.iter().copied());
        print_row("worst", evaluation.ideal.worst.iter().copied());

        section("DISTANCES");
        println!("{:<12} {:>12} {:>12}", "", "to best", "to worst");
        println!("{}", "─".repeat(38));
        for (i, label) in self.labels.iter().enumerate() {
            println!(
                "{:<12} {:>12.6} {:>12.6}",
                truncate(label),
                evaluation.distances.to_best[i],
                evaluation.distances.to_worst[i]
            );
        }
    }

    /// Print alternatives in rank order.
    pub(crate) fn print_ranking(&self) {
        let evaluation = &self.evaluation;

        section("RANKING");
        println!("{:>6}  {:<12} {:>12}", "Rank", "Alternative", "Score");
        println!("{}", "─".repeat(32));

        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by_key(|&i| evaluation.ranks.get(i).unwrap_or(usize::MAX));
        for i in order {
            println!(
                "{:>6}  {:<12} {:>12.6}",
                evaluation.ranks.get(i).unwrap_or_default(),
                truncate(&self.labels[i]),
                evaluation.scores.get(i).unwrap_or_default()
            );
        }
        println!();
    }

    fn print_header(&self) {
        print!("{:<12}", "");
        for name in &self.criteria {
            print!(" {:>12}", truncate(name));
        }
        println!();
        println!("{}", "─".repeat(12 + 13 * self.criteria.len()));
    }
}

fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "━".repeat(RULE_WIDTH));
}

fn print_row(label: &str, values: impl Iterator<Item = f64>) {
    print!("{:<12}", truncate(label));
    for v in values {
        print!(" {v:>12.6}");
    }
    println!();
}

fn truncate(text: &str) -> String {
    text.chars().take(12).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        assert_eq!(truncate("a-very-long-alternative"), "a-very-long-");
    }
}
