// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use taskflow::backends::adapter::DirectiveAdapter;
use taskflow::config::{load_and_validate_config, RuntimeBuilder};
use taskflow::traits::ResponseAdapter;
use tracing_subscriber::EnvFilter;

/// Split `NAME=VALUE` arguments into cookie pairs
fn parse_cookie(arg: &str) -> Option<(String, String)> {
    let (name, value) = arg.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <config.yaml> <request_path> [METHOD] [cookie=value ...]", args[0]);
        eprintln!("Example: {} configs/hello-world.yaml / GET", args[0]);
        eprintln!("Example: {} configs/visit-counter.yaml / GET SESSIONID=abc123", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2], &args[3..]) {
        eprintln!("❌ Failed to execute {}: {}", args[1], e);
        std::process::exit(1);
    }
}

fn run(config_file: &str, request_path: &str, rest: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let config = load_and_validate_config(config_file)?;
    let runtime = RuntimeBuilder::from_config(&config)?;

    let (method, cookie_args) = match rest.first() {
        Some(first) if !first.contains('=') => (first.to_uppercase(), &rest[1..]),
        _ => ("GET".to_string(), rest),
    };

    let mut builder = runtime
        .entry_point()
        .request_path(request_path)
        .request_method(&method);
    for arg in cookie_args {
        match parse_cookie(arg) {
            Some((name, value)) => builder = builder.cookie(name, value),
            None => eprintln!("⚠️  Ignoring malformed cookie argument '{}'", arg),
        }
    }
    let entry_point = builder.build();

    println!("📋 Configuration: {}", config_file);
    println!("🗂️  Collections: {}", runtime.collection_names().join(", "));
    println!("🔁 Max Iterations: {}", config.max_iterations);
    println!("🌐 Request: {} {}", method, request_path);

    let execution_start = Instant::now();
    let run = runtime.dispatch(&entry_point);
    let execution_time = execution_start.elapsed();

    println!("\n📊 Execution Results:");
    println!("⏱️  Execution Time: {:?}", execution_time);
    println!("🔢 Iterations: {}", run.iterations);
    println!("🧭 Path: {}", run.path.join(" → "));
    if run.is_truncated() {
        println!("🛑 Termination: iteration ceiling reached, result may be incomplete");
    } else {
        println!("✅ Termination: completed");
    }
    println!("{}", run.result.dump());

    let directive = DirectiveAdapter.respond(&run.result, &entry_point);
    println!("📨 Response: {}", directive);
    for (name, value) in directive.cookies() {
        println!("   🍪 {}={}", name, value);
    }

    println!("\n⏱️  Total Time: {:?}", start_time.elapsed());
    Ok(())
}
