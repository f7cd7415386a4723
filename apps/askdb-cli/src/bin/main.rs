use std::env;
use std::fs;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use askdb_core::config::AskdbConfig;
use askdb_core::corpus::{seed_records, JsonDirSource, StaticCorpus};
use askdb_core::traits::CorpusSource;
use askdb_core::types::Reply;
use askdb_hybrid::AskEngine;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <seed|ask|faqs|reindex> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn engine_from(config: &AskdbConfig) -> anyhow::Result<AskEngine> {
    let records_dir = config.records_dir();
    let source: Box<dyn CorpusSource> = if records_dir.is_dir() {
        Box::new(JsonDirSource::new(records_dir))
    } else {
        println!(
            "No records directory at {}; using the embedded seed corpus",
            records_dir.display()
        );
        Box::new(StaticCorpus::seeded())
    };
    AskEngine::new(source, config.retrieval.clone())
}

fn print_matches(matches: &[askdb_core::types::MatchSummary]) {
    println!("\n📊 Matches:");
    for (i, m) in matches.iter().enumerate() {
        println!("  {}. score={:.3}  id={}  {}", i + 1, m.score, m.id, m.question);
    }
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Answered { answer, matches, context_tag } => {
            println!("\n✅ Answer: {}", answer);
            if let Some(tag) = context_tag {
                println!("   Context: {}", tag);
            }
            print_matches(matches);
        }
        Reply::Suggestions { suggestions, matches } => {
            println!("\n🤔 Not sure. Did you mean:");
            for (i, s) in suggestions.iter().enumerate() {
                println!("  {}. {}", i + 1, s);
            }
            print_matches(matches);
        }
        Reply::NotUnderstood { suggestions, .. } => {
            println!("\n❓ I did not understand that.");
            if !suggestions.is_empty() {
                println!("   Some questions I do know:");
                for s in suggestions {
                    println!("   - {}", s);
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = AskdbConfig::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "seed" => {
            let dir = args.first().map(PathBuf::from).unwrap_or_else(|| config.records_dir());
            fs::create_dir_all(&dir)?;
            let records = seed_records();
            let path = dir.join("seed.json");
            fs::write(&path, serde_json::to_string_pretty(&records)?)?;
            println!("✅ Seeded {} records into {}", records.len(), path.display());
        }
        "ask" => {
            let question = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdb ask \"<question>\"");
                std::process::exit(1)
            });
            let engine = engine_from(&config)?;
            println!("🔍 askdb\n==================");
            println!("Question: {}", question);
            let reply = engine.ask(&question)?;
            print_reply(&reply);
        }
        "faqs" => {
            let limit = args.first().and_then(|a| a.parse().ok()).unwrap_or(10);
            let engine = engine_from(&config)?;
            let faqs = engine.faq_suggestions(limit)?;
            println!("📚 {} FAQs:", faqs.len());
            for f in &faqs {
                println!("  [{}] {}  (tags: {})", f.id, f.question, f.tags);
            }
        }
        "reindex" => {
            let engine = engine_from(&config)?;
            let count = engine.reindex()?;
            println!("✅ Reindex complete ({} records)", count);
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
