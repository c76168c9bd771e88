//! # Built-in Variants
//!
//! File: cli/src/bot/variants.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The four rule tables Cozmo ships with. Each reproduces one of the original
//! chatbots phrase for phrase, including their quirks: `basic` and `extended`
//! match case-sensitively, so `"hi"` also fires inside words like `"this"`,
//! and `intro` lists its `"Hello"`/`"Hi"` rule first, so `"My name is Hiro"`
//! is answered as a greeting.
//!
//! | name        | case        | fallback |
//! |-------------|-------------|----------|
//! | `basic`     | sensitive   | fixed    |
//! | `intro`     | sensitive   | fixed    |
//! | `extended`  | sensitive   | random   |
//! | `assistant` | insensitive | fixed    |
//!
use super::rules::{Action, CaseMode, Fallback, Response, RuleTable};

pub const BASIC: &str = "basic";
pub const INTRO: &str = "intro";
pub const EXTENDED: &str = "extended";
pub const ASSISTANT: &str = "assistant";

/// Variant used when neither the command line nor the configuration picks one.
pub const DEFAULT_VARIANT: &str = BASIC;

/// Name the bot answers to unless configured otherwise.
pub const DEFAULT_BOT_NAME: &str = "Cozmo";

const CREATOR: &str = "Clarence Itai Msindo";

const HELLO_THERE: &str = "Hello there!";
const DOING_WELL: &str = "I'm doing well, thank you. How about you?";
const NOT_UNDERSTOOD: &str = "I'm sorry, I didn't understand what you said.";
const CHAT_GREETING: &str = "Hey There! I'm Cozmo! How Can I Help You?";

/// Names of all built-in variants, in display order.
pub fn builtin_names() -> [&'static str; 4] {
    [BASIC, INTRO, EXTENDED, ASSISTANT]
}

/// Looks up a built-in table by name.
pub fn builtin(name: &str) -> Option<RuleTable> {
    match name {
        BASIC => Some(basic()),
        INTRO => Some(intro()),
        EXTENDED => Some(extended()),
        ASSISTANT => Some(assistant()),
        _ => None,
    }
}

/// Greeting and wellbeing only.
pub fn basic() -> RuleTable {
    RuleTable::new(BASIC, CHAT_GREETING)
        .describe("Greets and answers 'how are you'")
        .on(["hello", "hi"], Response::text(HELLO_THERE))
        .on(["how are you"], Response::text(DOING_WELL))
        .with_fallback(Fallback::fixed(NOT_UNDERSTOOD))
}

/// Walks the user from a greeting to introducing themselves.
pub fn intro() -> RuleTable {
    RuleTable::new(INTRO, "Hey! Whats Up? Say 'Hi' or 'Hello'")
        .describe("Small talk that asks for your name ('My name is ...')")
        .on(["Hello", "Hi"], Response::text("Hello there! How are you?"))
        .on(
            [
                "I am well",
                "I am good",
                "Good thanks",
                "I am good thanks and you?",
                "I am well thanks and you?",
                "I am ok",
                "Ok thanks",
                "Ok",
                "Good",
            ],
            Response::text(
                "Good to know! I'm doing well too. What is your name? Start by saying 'My name is'",
            ),
        )
        .on(
            ["My name is"],
            Response::template_after(
                "My name is ",
                format!(
                    "Nice to meet you, {{{{ name }}}}! In case you did not know, I was created by {} using GoLang. \
                     Now to end this chat, please say 'bye' to do so. Again it was nice to meet you!",
                    CREATOR
                ),
            ),
        )
        .on(["bye"], Response::farewell("Peace out! Press [x] to exit."))
        .with_fallback(Fallback::fixed("Nah, I don't understand what you said"))
}

/// `basic` plus identity questions and a randomized fallback.
pub fn extended() -> RuleTable {
    RuleTable::new(EXTENDED, CHAT_GREETING)
        .describe("Also answers 'what is your name' and 'who created you'")
        .on(["hello", "hi"], Response::text(HELLO_THERE))
        .on(["how are you"], Response::text(DOING_WELL))
        .on(["what is your name"], Response::template("My name is {{ bot }}"))
        .on(
            ["who created you"],
            Response::text(format!("I was created by {}", CREATOR)),
        )
        .with_fallback(Fallback::random([
            NOT_UNDERSTOOD,
            "Could you please rephrase that?",
            "I'm not sure I follow.",
        ]))
}

/// The virtual assistant's command table.
pub fn assistant() -> RuleTable {
    RuleTable::new(
        ASSISTANT,
        "Hey What's up! I am Cozmo, your virtual assistant. What can I help you with?",
    )
    .describe("Virtual assistant: day, time, Wikipedia, browser; 'bye' ends the session")
    .assistant()
    .case(CaseMode::Insensitive)
    .on(["open google"], Response::Action(Action::OpenBrowser))
    .on(["which day"], Response::Action(Action::TellDay))
    .on(["tell me the time"], Response::Action(Action::TellTime))
    .on(["from wikipedia"], Response::Action(Action::LookUp))
    .on(["tell me your name"], Response::template("My name is {{ bot }}"))
    .on(["bye"], Response::farewell("Goodbye! Have a nice day!"))
    .with_fallback(Fallback::fixed(
        "I'm not sure how to help with that. Could you please repeat?",
    ))
}
