use super::types::Command;

fn first_arg(args: &str) -> Option<String> {
    args.split_whitespace().next().map(str::to_string)
}

fn parse_iterations(raw: &str) -> u32 {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(u32::MAX)
}

/// Parse `/command args`. Returns `None` for plain text.
///
/// Commands may be addressed to a bot as `/command@botname`.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let token = parts.next()?;
    let args = parts.next().unwrap_or("").trim();
    let name = token[1..]
        .split_once('@')
        .map_or(&token[1..], |(name, _bot)| name)
        .to_lowercase();

    let command = match name.as_str() {
        "start" => Command::Start,
        "temp" => Command::Temp {
            value: first_arg(args),
        },
        "new" => Command::New,
        "delete" => Command::Delete {
            logs: first_arg(args).as_deref() == Some("logs"),
        },
        "private" => Command::Private {
            message: args.to_string(),
        },
        "bottalk" => {
            let (count, message) = args
                .split_once(char::is_whitespace)
                .unwrap_or((args, ""));
            Command::BotTalk {
                iterations: parse_iterations(count),
                message: message.trim().to_string(),
            }
        }
        "translate" => Command::Translate {
            target: first_arg(args),
        },
        "add" => Command::Add {
            user: first_arg(args),
        },
        "remove" => Command::Remove {
            user: first_arg(args),
        },
        "list" => Command::List,
        _ => Command::Unknown { name },
    };
    Some(command)
}
