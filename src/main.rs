use clap::Parser;
use helpnav::app::{HelpSettings, Toolbar};
use helpnav::input::Command;
use helpnav::net::{resolve_location, Loader};
use helpnav::HelpBrowser;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "helpnav")]
#[command(about = "Browse a set of help pages with home, back and forward")]
struct Args {
    /// Help home page (URL or path)
    home: String,

    /// Table of contents page (defaults to the home page)
    #[arg(long = "contents")]
    contents: Option<String>,

    /// Window title
    #[arg(long = "title", default_value = HelpSettings::DEFAULT_TITLE)]
    title: String,

    /// Print the loaded topic text after each navigation
    #[arg(long = "show-topic", default_value_t = false, action = clap::ArgAction::SetTrue)]
    show_topic: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let settings = match build_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut loader = Loader::new();
    let mut help = match HelpBrowser::open(settings, &mut loader) {
        Ok(help) => help,
        Err(e) => {
            eprintln!("Error: could not open help: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", help.title());
    println!("{}", Command::USAGE);
    print_state(&help, args.show_topic);

    if let Err(e) = run(&mut help, &mut loader, args.show_topic) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_settings(args: &Args) -> Result<HelpSettings, helpnav::net::LoadError> {
    let mut settings = HelpSettings::new(resolve_location(&args.home)?);
    if let Some(contents) = &args.contents {
        settings.contents = resolve_location(contents)?;
    }
    settings.title = args.title.clone();
    Ok(settings)
}

fn run(help: &mut HelpBrowser, loader: &mut Loader, show_topic: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(helpnav::input::ParseError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let moved = match command {
            Command::Home => help.home(loader),
            Command::Back => help.back(loader),
            Command::Forward => help.forward(loader),
            Command::Go(href) => help.follow_link(&href, loader),
            Command::Contents(href) => help.follow_contents_link(&href, loader),
            Command::Status => {
                print_state(help, show_topic);
                continue;
            }
            Command::History => {
                print_history(help);
                continue;
            }
            Command::Help => {
                println!("{}", Command::USAGE);
                continue;
            }
            Command::Quit => return Ok(()),
        };

        if let Some(error) = help.error() {
            println!("{}", error);
        }
        if moved {
            print_state(help, show_topic);
        } else if help.error().is_none() {
            println!("Nothing to go to");
        }
    }
}

fn print_state(help: &HelpBrowser, show_topic: bool) {
    let Toolbar {
        back_enabled,
        forward_enabled,
    } = help.toolbar();
    println!(
        "[{}] [{}] {}",
        if back_enabled { "<" } else { " " },
        if forward_enabled { ">" } else { " " },
        help.current()
    );
    if show_topic {
        println!("{}", help.topic());
    }
}

fn print_history(help: &HelpBrowser) {
    let history = help.history();
    for (i, url) in history.entries().iter().enumerate() {
        let marker = if i == history.position() { "*" } else { " " };
        println!("{} {:>3} {}", marker, i, url);
    }
}
