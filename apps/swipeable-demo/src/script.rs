//! Line-based gesture scripts.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! option rtl
//! layout 320
//! down 10
//! move 120
//! up 250
//! settle
//! expect locked
//! ```
//!
//! `option` lines configure the control and must precede every other command.

use std::fmt;

use swipeable_button::{
    AnimationSpec, ButtonState, ReleaseAnimation, SpringSpec, SwipeableButtonOptions,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Layout(f32),
    Down(f32),
    Move(f32),
    /// Release, optionally at a final position.
    Up(Option<f32>),
    Cancel,
    /// Run exactly this many frames.
    Frames(usize),
    /// Run frames until nothing is scheduled.
    Settle,
    Reset,
    Force,
    Disable(bool),
    Expect(ButtonState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub options: SwipeableButtonOptions,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptErrorKind {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    UnknownOption(String),
    UnknownState(String),
    InvalidFlag(String),
    OptionAfterGesture,
    TrailingInput(String),
}

/// Parse failure with the 1-based line it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ScriptErrorKind::UnknownCommand(word) => write!(f, "unknown command `{word}`"),
            ScriptErrorKind::MissingArgument(what) => write!(f, "missing {what}"),
            ScriptErrorKind::InvalidNumber(word) => write!(f, "`{word}` is not a number"),
            ScriptErrorKind::UnknownOption(word) => write!(f, "unknown option `{word}`"),
            ScriptErrorKind::UnknownState(word) => write!(f, "unknown state `{word}`"),
            ScriptErrorKind::InvalidFlag(word) => write!(f, "expected on/off, found `{word}`"),
            ScriptErrorKind::OptionAfterGesture => {
                write!(f, "options must come before the first gesture command")
            }
            ScriptErrorKind::TrailingInput(rest) => write!(f, "unexpected `{rest}`"),
        }
    }
}

impl std::error::Error for ScriptError {}

const STATES: [ButtonState; 6] = [
    ButtonState::Idle,
    ButtonState::Dragging,
    ButtonState::Committing,
    ButtonState::Cancelling,
    ButtonState::Locked,
    ButtonState::Resetting,
];

pub fn parse_script(source: &str) -> Result<Script, ScriptError> {
    let mut options = SwipeableButtonOptions::default();
    let mut commands = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let error = |kind| ScriptError { line, kind };
        let mut words = content.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        if command == "option" {
            if !commands.is_empty() {
                return Err(error(ScriptErrorKind::OptionAfterGesture));
            }
            options = apply_option(options, &mut words).map_err(error)?;
        } else {
            commands.push(parse_command(command, &mut words).map_err(error)?);
        }

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(error(ScriptErrorKind::TrailingInput(rest.join(" "))));
        }
    }

    Ok(Script { options, commands })
}

fn parse_command<'a>(
    command: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Command, ScriptErrorKind> {
    Ok(match command {
        "layout" => Command::Layout(number(words.next(), "container width")?),
        "down" => Command::Down(number(words.next(), "pointer x")?),
        "move" => Command::Move(number(words.next(), "pointer x")?),
        "up" => match words.next() {
            Some(word) => Command::Up(Some(number(Some(word), "pointer x")?)),
            None => Command::Up(None),
        },
        "cancel" => Command::Cancel,
        "frames" => {
            let word = words
                .next()
                .ok_or(ScriptErrorKind::MissingArgument("frame count"))?;
            let count = word
                .parse()
                .map_err(|_| ScriptErrorKind::InvalidNumber(word.to_owned()))?;
            Command::Frames(count)
        }
        "settle" => Command::Settle,
        "reset" => Command::Reset,
        "force" => Command::Force,
        "disable" => Command::Disable(flag(words.next())?),
        "expect" => {
            let word = words.next().ok_or(ScriptErrorKind::MissingArgument("state"))?;
            let state = STATES
                .into_iter()
                .find(|state| state.as_str() == word)
                .ok_or_else(|| ScriptErrorKind::UnknownState(word.to_owned()))?;
            Command::Expect(state)
        }
        other => return Err(ScriptErrorKind::UnknownCommand(other.to_owned())),
    })
}

fn apply_option<'a>(
    options: SwipeableButtonOptions,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<SwipeableButtonOptions, ScriptErrorKind> {
    let name = words
        .next()
        .ok_or(ScriptErrorKind::MissingArgument("option name"))?;
    Ok(match name {
        "width" => options.with_width(number(words.next(), "width")?),
        "handle" => options.with_handle_width(number(words.next(), "handle width")?),
        "rtl" => options.with_rtl(true),
        "disabled" => options.with_disabled(true),
        "no_animate" => options.with_no_animate(true),
        "spring" => options.with_release_animation(ReleaseAnimation::Spring(SpringSpec::default())),
        "gentle" => options.with_release_animation(ReleaseAnimation::Spring(SpringSpec::gentle())),
        "stiff" => options.with_release_animation(ReleaseAnimation::Spring(SpringSpec::stiff())),
        "tween" => {
            let spec = match words.next() {
                Some(word) => AnimationSpec {
                    duration_millis: word
                        .parse()
                        .map_err(|_| ScriptErrorKind::InvalidNumber(word.to_owned()))?,
                    ..AnimationSpec::settle()
                },
                None => AnimationSpec::settle(),
            };
            options.with_release_animation(ReleaseAnimation::Tween(spec))
        }
        "text" => {
            let text = words.next().ok_or(ScriptErrorKind::MissingArgument("label"))?;
            let unlocked = words
                .next()
                .ok_or(ScriptErrorKind::MissingArgument("unlocked label"))?;
            options.with_text(text, unlocked)
        }
        other => return Err(ScriptErrorKind::UnknownOption(other.to_owned())),
    })
}

fn number(word: Option<&str>, what: &'static str) -> Result<f32, ScriptErrorKind> {
    let word = word.ok_or(ScriptErrorKind::MissingArgument(what))?;
    word.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ScriptErrorKind::InvalidNumber(word.to_owned()))
}

fn flag(word: Option<&str>) -> Result<bool, ScriptErrorKind> {
    match word {
        None | Some("on") | Some("true") => Ok(true),
        Some("off") | Some("false") => Ok(false),
        Some(other) => Err(ScriptErrorKind::InvalidFlag(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_options_and_commands() {
        let script = parse_script(
            "# demo\noption rtl\noption tween 120\n\nlayout 320\ndown 0\nmove -90 # left\nup\nsettle\nexpect idle\n",
        )
        .expect("valid script");

        assert!(script.options.rtl);
        assert_eq!(
            script.options.release_animation,
            ReleaseAnimation::Tween(AnimationSpec {
                duration_millis: 120,
                ..AnimationSpec::settle()
            })
        );
        assert_eq!(
            script.commands,
            vec![
                Command::Layout(320.0),
                Command::Down(0.0),
                Command::Move(-90.0),
                Command::Up(None),
                Command::Settle,
                Command::Expect(ButtonState::Idle),
            ]
        );
    }

    #[test]
    fn reports_line_numbers() {
        let error = parse_script("down 0\n\nmove left\n").unwrap_err();
        assert_eq!(
            error,
            ScriptError {
                line: 3,
                kind: ScriptErrorKind::InvalidNumber("left".into()),
            }
        );
        assert_eq!(error.to_string(), "line 3: `left` is not a number");
    }

    #[test]
    fn options_must_lead() {
        let error = parse_script("down 0\noption rtl\n").unwrap_err();
        assert_eq!(error.kind, ScriptErrorKind::OptionAfterGesture);
    }

    #[test]
    fn rejects_unknown_words() {
        assert_eq!(
            parse_script("swipe 10").unwrap_err().kind,
            ScriptErrorKind::UnknownCommand("swipe".into())
        );
        assert_eq!(
            parse_script("expect flying").unwrap_err().kind,
            ScriptErrorKind::UnknownState("flying".into())
        );
        assert_eq!(
            parse_script("option sparkle").unwrap_err().kind,
            ScriptErrorKind::UnknownOption("sparkle".into())
        );
        assert_eq!(
            parse_script("cancel now").unwrap_err().kind,
            ScriptErrorKind::TrailingInput("now".into())
        );
    }

    #[test]
    fn missing_arguments_are_named() {
        let error = parse_script("layout").unwrap_err();
        assert_eq!(error.to_string(), "line 1: missing container width");
    }

    #[test]
    fn spring_presets_are_named() {
        for (word, spec) in [
            ("spring", SpringSpec::default()),
            ("gentle", SpringSpec::gentle()),
            ("stiff", SpringSpec::stiff()),
        ] {
            let script = parse_script(&format!("option {word}")).expect("valid script");
            assert_eq!(
                script.options.release_animation,
                ReleaseAnimation::Spring(spec),
                "option {word}"
            );
        }
    }

    #[test]
    fn disable_defaults_to_on() {
        let script = parse_script("disable\ndisable off").expect("valid script");
        assert_eq!(
            script.commands,
            vec![Command::Disable(true), Command::Disable(false)]
        );
    }
}
