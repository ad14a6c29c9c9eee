use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Toggle,
    Name(String),
    Add,
    New(String),
    Select(String),
    Weight(String),
    Price(String),
    Buy,
    Purchase {
        material: String,
        weight: String,
        price_per_kg: String,
    },
    List,
    History(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  toggle                          show or hide the new material form
  name <text>                     set the new material name
  add                             submit the new material form
  new <text>                      register a material in one step
  select <id>                     choose the material to purchase
  weight <kg>                     set the purchased weight
  price <per kg>                  set the price per kg
  buy                             submit the purchase form
  purchase <id> <kg> <per kg>     record a purchase in one step
  list                            show the dashboard
  history <id>                    show purchases of one material
  help                            show this text
  quit                            leave";

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "toggle" => no_args(verb, rest, Command::Toggle)?,
        "name" => Command::Name(rest.to_string()),
        "add" => no_args(verb, rest, Command::Add)?,
        "new" => Command::New(rest.to_string()),
        "select" => Command::Select(rest.to_string()),
        "weight" => Command::Weight(rest.to_string()),
        "price" => Command::Price(rest.to_string()),
        "buy" => no_args(verb, rest, Command::Buy)?,
        "purchase" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            let [material, weight, price_per_kg] = args.as_slice() else {
                anyhow::bail!("usage: purchase <id> <kg> <price per kg>");
            };
            Command::Purchase {
                material: material.to_string(),
                weight: weight.to_string(),
                price_per_kg: price_per_kg.to_string(),
            }
        }
        "list" | "dashboard" => no_args(verb, rest, Command::List)?,
        "history" => Command::History(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => anyhow::bail!("unknown command: {other} (try `help`)"),
    };

    Ok(command)
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        anyhow::bail!("{verb} takes no arguments");
    }
    Ok(command)
}
