use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use gym::{AgentType, GameConfig, GameResult, HeadToHeadStats, TournamentStats, run_game};

#[derive(Parser)]
#[command(name = "snake-gym")]
#[command(about = "Offline arena for pitting hydra swarms against each other")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct ArenaArgs {
    /// Number of games to run
    #[arg(short, long, default_value = "100")]
    games: usize,

    /// Grid size per axis, e.g. `20,20` or `8,8,8`
    #[arg(long, value_delimiter = ',', default_value = "20,20")]
    dims: Vec<i32>,

    /// Food cells kept on the board
    #[arg(long, default_value = "30")]
    food: usize,

    /// Maximum ticks per game
    #[arg(long, default_value = "300")]
    max_ticks: u32,

    /// Seed of the first game
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Run games in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a free-for-all tournament between multiple agents
    Tournament {
        /// Agents to include in the tournament
        #[arg(short, long, value_delimiter = ',', default_value = "swarm,aggressive,hoarder,random")]
        agents: Vec<AgentType>,

        #[command(flatten)]
        arena: ArenaArgs,
    },

    /// Run a head-to-head duel between two agents
    Duel {
        /// First agent
        #[arg(short = '1', long, default_value = "swarm")]
        agent1: AgentType,

        /// Second agent
        #[arg(short = '2', long, default_value = "random")]
        agent2: AgentType,

        #[command(flatten)]
        arena: ArenaArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament { agents, arena } => run_tournament_cmd(&agents, &arena),
        Commands::Duel {
            agent1,
            agent2,
            arena,
        } => run_duel_cmd(agent1, agent2, &arena),
    }
}

fn game_config(args: &ArenaArgs, num_players: usize) -> GameConfig {
    GameConfig {
        dimensions: args.dims.clone(),
        num_players,
        food: args.food,
        max_ticks: args.max_ticks,
        seed: args.seed,
    }
}

fn progress_bar(args: &ArenaArgs) -> Option<ProgressBar> {
    if args.json {
        return None;
    }
    let pb = ProgressBar::new(args.games as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    Some(pb)
}

fn play(agent_types: &[AgentType], config: &GameConfig, args: &ArenaArgs) -> Vec<GameResult> {
    let pb = progress_bar(args);
    let game = |n: usize| {
        let result = run_game(agent_types, config, config.seed.wrapping_add(n as u64));
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
        result
    };

    let results: Vec<_> = if args.parallel {
        (0..args.games).into_par_iter().map(game).collect()
    } else {
        (0..args.games).map(game).collect()
    };

    if let Some(pb) = pb {
        pb.finish_with_message("Done!");
    }
    results
}

fn print_header(title: &str, args: &ArenaArgs) {
    println!("\n{}", title.green().bold());
    println!(
        "Games: {} | Grid: {:?} | Food: {} | Max ticks: {}",
        args.games, args.dims, args.food, args.max_ticks
    );
    println!("Parallel: {} | Seed: {}", args.parallel, args.seed);
    println!();
}

fn run_tournament_cmd(agent_types: &[AgentType], args: &ArenaArgs) {
    if !args.json {
        print_header("=== Snake Gym Tournament ===", args);
    }

    let agent_names: Vec<String> = agent_types.iter().map(|t| t.label().to_string()).collect();
    let config = game_config(args, agent_types.len());
    let results = play(agent_types, &config, args);

    let stats = TournamentStats::from_results(&results, &agent_names);
    if args.json {
        println!("{}", stats.to_json());
    } else {
        stats.print_summary();
    }
}

fn run_duel_cmd(agent1: AgentType, agent2: AgentType, args: &ArenaArgs) {
    if !args.json {
        print_header("=== Snake Gym Duel ===", args);
        println!("{:?} vs {:?}", agent1, agent2);
    }

    let config = game_config(args, 2);
    let results = play(&[agent1, agent2], &config, args);

    let h2h = HeadToHeadStats::from_results(&results, agent1.label(), agent2.label());
    if args.json {
        println!("{}", h2h.to_json());
    } else {
        h2h.print_summary();
    }
}
