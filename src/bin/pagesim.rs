use anyhow::{Context, Result, anyhow, bail};
use rustyline::{DefaultEditor, error::ReadlineError};

use pagesim::{
    common::{AccessKind, ProcessId},
    config::{PolicyKind, SimConfig},
    debugger::{DebugLevel, set_debug_level},
    engine::Simulator,
    report,
    workload::{self, Access, parse_address},
};

const HELP: &str = "\
commands:
  proc <bytes>          create a process
  read <pid> <addr>     read access
  write <pid> <addr>    write access
  sweep                 run the default sweep over all processes
  load <file>           run a trace file (<pid> <r|w> <addr> per line)
  mem                   show physical memory
  stats                 show statistics
  table <pid>           show a page table
  check                 verify frame/page consistency
  help                  this text
  quit                  exit";

enum Flow {
    Continue,
    Quit,
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("--{}=", name);
    args.iter().find_map(|arg| arg.strip_prefix(prefix.as_str()))
}

fn parse_config(args: &[String]) -> Result<SimConfig> {
    let mut config = SimConfig::default();

    if let Some(size) = flag(args, "page-size") {
        config.page_size = size.parse().context("invalid --page-size")?;
    }
    if let Some(size) = flag(args, "memory") {
        config.physical_size = size.parse().context("invalid --memory")?;
    }
    if let Some(policy) = flag(args, "policy") {
        config.policy = policy.parse::<PolicyKind>()?;
    }
    if let Some(seed) = flag(args, "seed") {
        config.seed = seed.parse().context("invalid --seed")?;
    }

    Ok(config)
}

fn parse_pid(token: Option<&str>) -> Result<ProcessId> {
    let token = token.ok_or_else(|| anyhow!("missing pid"))?;
    Ok(ProcessId(token.parse().context("invalid pid")?))
}

fn access(sim: &mut Simulator, kind: AccessKind, args: &[&str]) -> Result<()> {
    let pid = parse_pid(args.first().copied())?;
    let address = args
        .get(1)
        .and_then(|a| parse_address(a))
        .ok_or_else(|| anyhow!("missing or invalid address"))?;

    let faults = sim.page_faults();
    let physical = sim.translate(pid, address, kind)?;
    let (page, _) = sim.decompose(address);

    println!(
        "{} {} va {} -> page {} -> pa {}{}",
        pid,
        kind,
        address,
        page,
        physical,
        if sim.page_faults() > faults {
            " [page fault]"
        } else {
            ""
        }
    );
    Ok(())
}

/// Drives `accesses` and prints each step, including the steps of an access
/// that completed before a failure.
fn run_logged(sim: &mut Simulator, accesses: &[Access]) -> Result<usize> {
    sim.take_events();
    let result = workload::drive(sim, accesses);
    print!("{}", report::access_log(&sim.take_events()));
    Ok(result?.len())
}

fn execute(sim: &mut Simulator, line: &str) -> Result<Flow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = tokens.split_first() else {
        return Ok(Flow::Continue);
    };

    match *command {
        "proc" => {
            let size = args
                .first()
                .ok_or_else(|| anyhow!("missing size"))?
                .parse::<usize>()
                .context("invalid size")?;
            let pid = sim.create_process(size);
            let pages = sim.process(pid)?.num_pages();
            println!("{} created: {} pages ({} bytes)", pid, pages, size);
        }
        "read" => access(sim, AccessKind::Read, args)?,
        "write" => access(sim, AccessKind::Write, args)?,
        "sweep" => {
            let accesses = workload::default_sweep(sim);
            run_logged(sim, &accesses)?;
            print!("{}", report::memory_map(sim));
            print!("{}", report::statistics(&sim.stats()));
        }
        "load" => {
            let path = args.first().ok_or_else(|| anyhow!("missing file"))?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path))?;
            let accesses = workload::parse_trace(&text)?;
            let completed = run_logged(sim, &accesses)?;
            print!("{}", report::memory_map(sim));
            println!("{} accesses completed", completed);
        }
        "mem" => print!("{}", report::memory_map(sim)),
        "stats" => print!("{}", report::statistics(&sim.stats())),
        "table" => {
            let pid = parse_pid(args.first().copied())?;
            print!("{}", report::page_table(sim, pid)?);
        }
        "check" => match sim.check_invariants() {
            Ok(()) => println!("ok"),
            Err(violation) => bail!(violation),
        },
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => bail!("unknown command '{}', try 'help'", other),
    }

    Ok(Flow::Continue)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let debug_level = flag(&args, "debug")
        .and_then(|level| level.parse::<u8>().ok())
        .map(DebugLevel::from_u8)
        .unwrap_or(DebugLevel::Off);

    set_debug_level(debug_level);

    let config = parse_config(&args)?;
    let mut sim = Simulator::new(config)?;

    println!("pagesim");
    println!(
        "page size {} bytes, {} frames, policy {}",
        sim.page_size(),
        sim.stats().num_frames,
        sim.policy_name()
    );
    println!("Type 'help' for commands. Ctrl+D to exit");

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("pagesim> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match execute(&mut sim, line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(error) => println!("error: {:#}", error),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        }
    }

    print!("{}", report::statistics(&sim.stats()));
    Ok(())
}
