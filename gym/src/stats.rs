use serde::{Deserialize, Serialize};

use crate::arena::Arena;

/// Result of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    /// Index of the player with the highest score, or None when tied or nobody scored
    pub winner: Option<usize>,
    /// Number of ticks the game lasted
    pub ticks: u32,
    pub num_players: usize,
    /// Banked length per player
    pub scores: Vec<usize>,
    /// Snakes brought home per player
    pub saved: Vec<usize>,
    /// Snakes lost per player
    pub lost: Vec<usize>,
}

impl GameResult {
    pub fn from_arena(arena: &Arena, ticks: u32) -> Self {
        let scores = arena.scores();
        Self {
            winner: winner(&scores),
            ticks,
            num_players: scores.len(),
            saved: arena.players().iter().map(|p| p.saved).collect(),
            lost: arena.players().iter().map(|p| p.lost).collect(),
            scores,
        }
    }
}

fn winner(scores: &[usize]) -> Option<usize> {
    let best = *scores.iter().max()?;
    if best == 0 || scores.iter().filter(|s| **s == best).count() > 1 {
        return None;
    }
    scores.iter().position(|s| *s == best)
}

/// Aggregated statistics for an agent
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub total_score: u64,
    pub total_saved: u64,
    pub total_lost: u64,
}

impl AgentStats {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64
        }
    }

    pub fn avg_score(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.total_games as f64
        }
    }

    pub fn avg_saved(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_saved as f64 / self.total_games as f64
        }
    }
}

/// Tournament statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentStats {
    pub agent_stats: Vec<AgentStats>,
    pub total_games: u32,
    pub total_draws: u32,
    pub avg_game_length: f64,
    pub min_game_length: u32,
    pub max_game_length: u32,
}

impl TournamentStats {
    /// Compute statistics from game results
    pub fn from_results(results: &[GameResult], agent_names: &[String]) -> Self {
        let mut agent_stats: Vec<AgentStats> = agent_names
            .iter()
            .map(|name| AgentStats::new(name.clone()))
            .collect();

        let mut total_draws = 0u32;
        let mut min_length = u32::MAX;
        let mut max_length = 0u32;
        let mut total_ticks = 0u64;

        for result in results {
            total_ticks += result.ticks as u64;
            min_length = min_length.min(result.ticks);
            max_length = max_length.max(result.ticks);
            if result.winner.is_none() {
                total_draws += 1;
            }

            for (i, stats) in agent_stats
                .iter_mut()
                .enumerate()
                .take(result.num_players)
            {
                stats.total_games += 1;
                stats.total_score += result.scores.get(i).copied().unwrap_or(0) as u64;
                stats.total_saved += result.saved.get(i).copied().unwrap_or(0) as u64;
                stats.total_lost += result.lost.get(i).copied().unwrap_or(0) as u64;
                match result.winner {
                    Some(winner) if winner == i => stats.wins += 1,
                    Some(_) => stats.losses += 1,
                    None => stats.draws += 1,
                }
            }
        }

        let total_games = results.len() as u32;
        let avg_game_length = if total_games > 0 {
            total_ticks as f64 / total_games as f64
        } else {
            0.0
        };

        Self {
            agent_stats,
            total_games,
            total_draws,
            avg_game_length,
            min_game_length: if min_length == u32::MAX { 0 } else { min_length },
            max_game_length: max_length,
        }
    }

    /// Print a formatted summary table
    pub fn print_summary(&self) {
        use colored::Colorize;
        use tabled::{Table, Tabled};

        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Agent")]
            name: String,
            #[tabled(rename = "Wins")]
            wins: u32,
            #[tabled(rename = "Losses")]
            losses: u32,
            #[tabled(rename = "Draws")]
            draws: u32,
            #[tabled(rename = "Win Rate")]
            win_rate: String,
            #[tabled(rename = "Avg Score")]
            avg_score: String,
            #[tabled(rename = "Avg Saved")]
            avg_saved: String,
            #[tabled(rename = "Lost")]
            lost: u64,
        }

        let rows: Vec<Row> = self
            .agent_stats
            .iter()
            .map(|s| Row {
                name: s.name.clone(),
                wins: s.wins,
                losses: s.losses,
                draws: s.draws,
                win_rate: format!("{:.1}%", s.win_rate() * 100.0),
                avg_score: format!("{:.1}", s.avg_score()),
                avg_saved: format!("{:.1}", s.avg_saved()),
                lost: s.total_lost,
            })
            .collect();

        let table = Table::new(rows).to_string();

        println!("\n{}", "=== Tournament Results ===".green().bold());
        println!("{}", table);
        println!();
        println!(
            "Total games: {} | Draws: {} | Avg length: {:.1} ticks",
            self.total_games.to_string().cyan(),
            self.total_draws.to_string().yellow(),
            self.avg_game_length
        );
        println!(
            "Game length range: {} - {} ticks",
            self.min_game_length.to_string().cyan(),
            self.max_game_length.to_string().cyan()
        );
    }

    /// Export stats to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Head-to-head comparison between two agents
#[derive(Clone, Debug, Serialize)]
pub struct HeadToHeadStats {
    pub agent1_name: String,
    pub agent2_name: String,
    pub agent1_wins: u32,
    pub agent2_wins: u32,
    pub draws: u32,
    pub agent1_score: u64,
    pub agent2_score: u64,
}

impl HeadToHeadStats {
    pub fn from_results(results: &[GameResult], agent1_name: &str, agent2_name: &str) -> Self {
        let mut stats = Self {
            agent1_name: agent1_name.to_string(),
            agent2_name: agent2_name.to_string(),
            agent1_wins: 0,
            agent2_wins: 0,
            draws: 0,
            agent1_score: 0,
            agent2_score: 0,
        };

        for result in results {
            match result.winner {
                Some(0) => stats.agent1_wins += 1,
                Some(1) => stats.agent2_wins += 1,
                _ => stats.draws += 1,
            }
            stats.agent1_score += result.scores.first().copied().unwrap_or(0) as u64;
            stats.agent2_score += result.scores.get(1).copied().unwrap_or(0) as u64;
        }
        stats
    }

    fn total(&self) -> u32 {
        (self.agent1_wins + self.agent2_wins + self.draws).max(1)
    }

    pub fn print_summary(&self) {
        use colored::Colorize;

        println!("\n{}", "=== Head-to-Head Results ===".green().bold());
        println!(
            "{}: {} wins ({:.1}%), banked {}",
            self.agent1_name.cyan(),
            self.agent1_wins,
            self.agent1_wins as f64 / self.total() as f64 * 100.0,
            self.agent1_score
        );
        println!(
            "{}: {} wins ({:.1}%), banked {}",
            self.agent2_name.cyan(),
            self.agent2_wins,
            self.agent2_wins as f64 / self.total() as f64 * 100.0,
            self.agent2_score
        );
        println!("Draws: {}", self.draws.to_string().yellow());
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(scores: Vec<usize>, ticks: u32) -> GameResult {
        GameResult {
            winner: winner(&scores),
            ticks,
            num_players: scores.len(),
            saved: scores.iter().map(|s| usize::from(*s > 0)).collect(),
            lost: vec![0; scores.len()],
            scores,
        }
    }

    #[test]
    fn test_winner_needs_unique_positive_score() {
        assert_eq!(winner(&[3, 7, 1]), Some(1));
        assert_eq!(winner(&[4, 4]), None);
        assert_eq!(winner(&[0, 0]), None);
        assert_eq!(winner(&[]), None);
    }

    #[test]
    fn test_tournament_aggregates() {
        let results = vec![result(vec![5, 2], 10), result(vec![1, 1], 30), result(vec![0, 4], 20)];
        let names = vec!["Swarm".to_string(), "Random".to_string()];
        let stats = TournamentStats::from_results(&results, &names);

        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_draws, 1);
        assert_eq!(stats.min_game_length, 10);
        assert_eq!(stats.max_game_length, 30);
        assert!((stats.avg_game_length - 20.0).abs() < f64::EPSILON);

        let swarm = &stats.agent_stats[0];
        assert_eq!((swarm.wins, swarm.losses, swarm.draws), (1, 1, 1));
        assert_eq!(swarm.total_score, 6);
        assert!((swarm.avg_score() - 2.0).abs() < f64::EPSILON);
        assert!(stats.to_json().contains("\"Random\""));
    }

    #[test]
    fn test_head_to_head() {
        let results = vec![result(vec![5, 2], 10), result(vec![0, 4], 20), result(vec![0, 0], 5)];
        let h2h = HeadToHeadStats::from_results(&results, "Swarm", "Random");
        assert_eq!(h2h.agent1_wins, 1);
        assert_eq!(h2h.agent2_wins, 1);
        assert_eq!(h2h.draws, 1);
        assert_eq!(h2h.agent1_score, 5);
        assert_eq!(h2h.agent2_score, 6);
    }
}
