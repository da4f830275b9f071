//! Interactive drill engine.
//!
//! Runs the topic-selection / drilling / continue-or-switch state machine over
//! a [`Console`]. The engine owns the formula bank and the answer history for
//! its whole lifetime; nothing else mutates them.

use serde::Serialize;
use uuid::Uuid;

use crate::bank::FormulaBank;
use crate::console::Console;
use crate::error::DrillError;
use crate::formula::FormulaId;
use crate::history::{AnswerHistory, DEFAULT_HISTORY_CAPACITY};
use crate::statistics::{compute_report, StatsReport};

const GREETING: &str = "\n### Formula drill ###\nThe drill has started. Good luck!";
const DESCRIPTION: &str = "\nAfter the answer is shown, type '+' if you remembered it,\n\
                           '-' if you got it wrong, or 'q' to quit.";
const COMMANDS: &str = "\nCommands: 'q' - quit, 't' - choose another topic";
const TOPIC_HINT: &str = "\nAvailable topics:";
const SELECT_TOPIC: &str = "Enter a topic to drill (or 'q' to quit):";
const UNKNOWN_TOPIC: &str = "\nThat topic is not available in this drill.\nPlease try again:";
const REVEAL_HINT: &str = "Press Enter to reveal the answer";
const SELF_CHECK: &str = "\nDid you answer correctly? (+/-/t/q):";
const CONTINUE_DRILL: &str = "\nDo you want to keep drilling? (y/n):";
const CHANGE_TOPIC: &str = "\nThat was the last formula in this topic. Switch to another topic? (y/n):";
const INVALID_INPUT: &str = "Invalid input. Please try again.";
const NO_TOPICS: &str = "No formulas available for the selected topics.";
const FAREWELL: &str = "\nDrill finished. Keep it up!";

/// Why a drill session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The user typed the quit signal.
    Quit,
    /// The user declined to keep drilling after finishing a topic.
    Finished,
    /// Input ran out before the user quit.
    InputClosed,
    /// There was nothing to drill.
    NoTopics,
}

/// Outcome of one [`DrillEngine::start_drill`] call.
#[derive(Debug, Clone, Serialize)]
pub struct DrillSummary {
    pub session_id: Uuid,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Topics worked through to the last formula.
    pub topics_completed: usize,
    pub ended_by: EndReason,
}

impl DrillSummary {
    fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            answered: 0,
            correct: 0,
            incorrect: 0,
            topics_completed: 0,
            ended_by: EndReason::NoTopics,
        }
    }
}

#[derive(Debug)]
enum DrillState {
    SelectingTopic,
    Drilling(String),
    PostTopic(String),
    Done(EndReason),
}

/// What the user asked for after seeing a formula.
enum Flow {
    Answered(bool),
    SwitchTopic,
    Stop(EndReason),
}

enum TopicChoice {
    Topic(String),
    Stop(EndReason),
}

/// A recognised control token, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Quit,
    SwitchTopic,
    Correct,
    Incorrect,
    Yes,
    No,
    Blank,
    Other,
}

impl Token {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" => Token::Blank,
            "q" => Token::Quit,
            "t" => Token::SwitchTopic,
            "+" => Token::Correct,
            "-" => Token::Incorrect,
            "y" => Token::Yes,
            "n" => Token::No,
            _ => Token::Other,
        }
    }
}

/// The drill engine.
pub struct DrillEngine {
    bank: FormulaBank,
    history: AnswerHistory,
    last_session: Option<Uuid>,
}

impl DrillEngine {
    pub fn new(bank: FormulaBank) -> Self {
        Self::with_history_capacity(bank, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(bank: FormulaBank, capacity: usize) -> Self {
        Self {
            bank,
            history: AnswerHistory::with_capacity(capacity),
            last_session: None,
        }
    }

    pub fn bank(&self) -> &FormulaBank {
        &self.bank
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    /// Id of the most recent drill session, if one has run.
    pub fn last_session(&self) -> Option<Uuid> {
        self.last_session
    }

    /// Record an outcome outside of an interactive session.
    pub fn record_answer(&mut self, formula: FormulaId, is_correct: bool) {
        self.history.record_answer(formula, is_correct);
    }

    /// Snapshot of a topic's formulas, most error-prone first.
    ///
    /// The sort is stable, so formulas with equal error rates keep their bank
    /// order. Never-answered formulas have a rate of 0.0 and therefore come last
    /// among any that have been missed.
    pub fn training_queue(&self, topic: &str) -> Result<Vec<FormulaId>, DrillError> {
        let mut keyed: Vec<(FormulaId, f64)> = self
            .bank
            .formulas_in(topic)?
            .iter()
            .map(|&id| (id, self.history.error_rate(id)))
            .collect();
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(keyed.into_iter().map(|(id, _)| id).collect())
    }

    /// Statistics over the history recorded so far, stamped with the id of
    /// the last session.
    pub fn report(&self, window: Option<usize>, hardest_limit: usize) -> StatsReport {
        StatsReport {
            session_id: self.last_session,
            ..compute_report(&self.bank, &self.history, window, hardest_limit)
        }
    }

    /// Run an interactive drill over `available_topics`.
    ///
    /// Names that are not in the bank are dropped. With nothing left to drill
    /// the call prints a notice and returns immediately.
    pub fn start_drill(
        &mut self,
        available_topics: &[String],
        console: &mut dyn Console,
    ) -> Result<DrillSummary, DrillError> {
        let session_id = Uuid::new_v4();
        self.last_session = Some(session_id);
        let span = tracing::info_span!("drill", session = %session_id);
        let _enter = span.enter();

        let mut summary = DrillSummary::new(session_id);

        let topics: Vec<String> = available_topics
            .iter()
            .filter(|t| {
                let known = self.bank.contains_topic(t);
                if !known {
                    tracing::warn!("topic '{t}' is not in the formula bank, ignoring");
                }
                known
            })
            .cloned()
            .collect();

        if topics.is_empty() {
            console.say(NO_TOPICS)?;
            return Ok(summary);
        }

        tracing::info!("drill started with {} topic(s)", topics.len());
        console.say(GREETING)?;
        console.say(DESCRIPTION)?;
        console.say(COMMANDS)?;

        let mut state = DrillState::SelectingTopic;
        loop {
            tracing::trace!(?state, "drill state");
            state = match state {
                DrillState::SelectingTopic => match select_topic(&topics, console)? {
                    TopicChoice::Topic(topic) => DrillState::Drilling(topic),
                    TopicChoice::Stop(reason) => DrillState::Done(reason),
                },
                DrillState::Drilling(topic) => self.drill_topic(topic, console, &mut summary)?,
                DrillState::PostTopic(topic) => {
                    summary.topics_completed += 1;
                    console.say(CONTINUE_DRILL)?;
                    match ask_yes_no(console)? {
                        None => DrillState::Done(EndReason::InputClosed),
                        Some(false) => DrillState::Done(EndReason::Finished),
                        Some(true) => {
                            console.say(CHANGE_TOPIC)?;
                            match ask_yes_no(console)? {
                                None => DrillState::Done(EndReason::InputClosed),
                                Some(true) => DrillState::SelectingTopic,
                                Some(false) => DrillState::Drilling(topic),
                            }
                        }
                    }
                }
                DrillState::Done(reason) => {
                    summary.ended_by = reason;
                    break;
                }
            };
        }

        console.say(FAREWELL)?;
        tracing::info!(
            answered = summary.answered,
            correct = summary.correct,
            incorrect = summary.incorrect,
            "drill ended: {:?}",
            summary.ended_by
        );
        Ok(summary)
    }

    /// Work through one topic's queue, rebuilt fresh on every entry.
    fn drill_topic(
        &mut self,
        topic: String,
        console: &mut dyn Console,
        summary: &mut DrillSummary,
    ) -> Result<DrillState, DrillError> {
        let queue = self.training_queue(&topic)?;
        tracing::debug!("drilling '{topic}' ({} formulas)", queue.len());

        for id in queue {
            match self.ask_formula(id, console)? {
                Flow::Answered(is_correct) => {
                    summary.answered += 1;
                    if is_correct {
                        summary.correct += 1;
                    } else {
                        summary.incorrect += 1;
                    }
                }
                Flow::SwitchTopic => return Ok(DrillState::SelectingTopic),
                Flow::Stop(reason) => return Ok(DrillState::Done(reason)),
            }
        }

        Ok(DrillState::PostTopic(topic))
    }

    /// Show the name, wait for a blank line, reveal the answer, then record
    /// the user's self-assessment.
    fn ask_formula(&mut self, id: FormulaId, console: &mut dyn Console) -> Result<Flow, DrillError> {
        let formula = self.bank.formula(id);
        console.say(&format!("\nFormula: {}", formula.name()))?;
        console.say(REVEAL_HINT)?;

        loop {
            let Some(line) = console.read_line()? else {
                return Ok(Flow::Stop(EndReason::InputClosed));
            };
            match Token::parse(&line) {
                Token::Quit => return Ok(Flow::Stop(EndReason::Quit)),
                Token::SwitchTopic => return Ok(Flow::SwitchTopic),
                Token::Blank => break,
                _ => console.say(REVEAL_HINT)?,
            }
        }

        console.say(&format!("\nAnswer: {}", formula.answer()))?;

        loop {
            console.say(SELF_CHECK)?;
            let Some(line) = console.read_line()? else {
                return Ok(Flow::Stop(EndReason::InputClosed));
            };
            let is_correct = match Token::parse(&line) {
                Token::Correct => true,
                Token::Incorrect => false,
                Token::SwitchTopic => return Ok(Flow::SwitchTopic),
                Token::Quit => return Ok(Flow::Stop(EndReason::Quit)),
                _ => {
                    console.say(INVALID_INPUT)?;
                    continue;
                }
            };
            self.history.record_answer(id, is_correct);
            return Ok(Flow::Answered(is_correct));
        }
    }
}

/// Prompt until the user names one of `topics` or quits.
fn select_topic(topics: &[String], console: &mut dyn Console) -> Result<TopicChoice, DrillError> {
    loop {
        console.say(TOPIC_HINT)?;
        console.say(&topics.join(", "))?;
        console.say(SELECT_TOPIC)?;

        let Some(line) = console.read_line()? else {
            return Ok(TopicChoice::Stop(EndReason::InputClosed));
        };
        let choice = line.trim();

        if choice.is_empty() {
            console.say(INVALID_INPUT)?;
            continue;
        }
        if choice.eq_ignore_ascii_case("q") {
            return Ok(TopicChoice::Stop(EndReason::Quit));
        }
        if let Some(topic) = topics.iter().find(|t| t.as_str() == choice) {
            return Ok(TopicChoice::Topic(topic.clone()));
        }

        console.say(UNKNOWN_TOPIC)?;
    }
}

/// Read `y` or `n`; `None` when input closes first.
fn ask_yes_no(console: &mut dyn Console) -> Result<Option<bool>, DrillError> {
    loop {
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };
        match Token::parse(&line) {
            Token::Yes => return Ok(Some(true)),
            Token::No => return Ok(Some(false)),
            _ => console.say(INVALID_INPUT)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::formula::Formula;

    fn engine_with(records: &[(&str, &str, &str)]) -> DrillEngine {
        let mut bank = FormulaBank::new();
        for (topic, name, answer) in records {
            bank.add_formula(topic, Formula::new(*name, *answer)).unwrap();
        }
        DrillEngine::new(bank)
    }

    fn topics(engine: &DrillEngine) -> Vec<String> {
        engine.bank().list_topics()
    }

    #[test]
    fn token_parsing_is_case_insensitive() {
        assert_eq!(Token::parse("Q"), Token::Quit);
        assert_eq!(Token::parse(" t "), Token::SwitchTopic);
        assert_eq!(Token::parse("Y"), Token::Yes);
        assert_eq!(Token::parse("n"), Token::No);
        assert_eq!(Token::parse("+"), Token::Correct);
        assert_eq!(Token::parse("-"), Token::Incorrect);
        assert_eq!(Token::parse("   "), Token::Blank);
        assert_eq!(Token::parse("maybe"), Token::Other);
    }

    #[test]
    fn empty_topic_list_is_a_no_op() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let mut console = ScriptedConsole::new(["Algebra"]);

        let summary = engine.start_drill(&[], &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::NoTopics);
        assert_eq!(console.reads(), 0);
        assert!(console.transcript().contains(NO_TOPICS));
    }

    #[test]
    fn unknown_topics_are_dropped() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let mut console = ScriptedConsole::new(["q"]);

        let summary = engine
            .start_drill(&["Physics".to_string()], &mut console)
            .unwrap();
        assert_eq!(summary.ended_by, EndReason::NoTopics);
    }

    #[test]
    fn topic_selection_reprompts_until_valid() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["", "Physics", "Algebra", "q"]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::Quit);
        assert_eq!(summary.answered, 0);
        let transcript = console.transcript();
        assert!(transcript.contains(INVALID_INPUT));
        assert!(transcript.contains("not available"));
        assert!(transcript.contains("Formula: Square"));
    }

    #[test]
    fn non_blank_input_before_reveal_is_ignored() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["Algebra", "a²+2ab+b²", "", "+", "n"]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::Finished);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.topics_completed, 1);
    }

    #[test]
    fn invalid_self_check_records_nothing() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["Algebra", "", "yes", "?", "-", "n"]);

        engine.start_drill(&topics, &mut console).unwrap();

        let id = engine.bank().formulas_in("Algebra").unwrap()[0];
        assert_eq!(engine.history().get_history(id, None), vec![false]);
        assert_eq!(
            console
                .output()
                .iter()
                .filter(|l| l.as_str() == INVALID_INPUT)
                .count(),
            2
        );
    }

    #[test]
    fn quit_at_self_check_records_nothing() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["Algebra", "", "Q", "extra"]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::Quit);
        assert!(engine.history().is_empty());
        assert_eq!(console.remaining(), 1);
    }

    #[test]
    fn switch_abandons_rest_of_topic() {
        let mut engine = engine_with(&[
            ("Algebra", "Square", "(a+b)²"),
            ("Algebra", "Cube", "(a+b)³"),
            ("Geometry", "Area", "πr²"),
        ]);
        let topics = topics(&engine);
        // Answer Square, switch away before Cube, answer Area, then stop.
        let mut console =
            ScriptedConsole::new(["Algebra", "", "+", "t", "Geometry", "", "-", "n"]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.answered, 2);
        assert_eq!(summary.topics_completed, 1);
        assert_eq!(summary.ended_by, EndReason::Finished);
        let cube = engine.bank().formulas_in("Algebra").unwrap()[1];
        assert_eq!(engine.history().len(cube), 0);
    }

    #[test]
    fn switch_at_self_check_does_not_record() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["Algebra", "", "T", "q"]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::Quit);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn training_queue_orders_by_error_rate_stably() {
        let mut engine = engine_with(&[
            ("Algebra", "A", "1"),
            ("Algebra", "B", "2"),
            ("Algebra", "C", "3"),
            ("Algebra", "D", "4"),
        ]);
        let ids = engine.bank().formulas_in("Algebra").unwrap().to_vec();
        // A: 0.5, B: unseen, C: 1.0, D: 0.5
        engine.record_answer(ids[0], true);
        engine.record_answer(ids[0], false);
        engine.record_answer(ids[2], false);
        engine.record_answer(ids[3], false);
        engine.record_answer(ids[3], true);

        let queue = engine.training_queue("Algebra").unwrap();
        assert_eq!(queue, vec![ids[2], ids[0], ids[3], ids[1]]);
        assert_eq!(engine.bank().formulas_in("Algebra").unwrap(), ids.as_slice());
    }

    #[test]
    fn invalid_utf8_input_reprompts() {
        use crate::console::IoConsole;

        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let input = std::io::Cursor::new(b"\xff\xfe\nAlgebra\n\xff\n\n\x80\n+\nn\n".to_vec());
        let mut console = IoConsole::new(input, Vec::new());

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::Finished);
        assert_eq!(summary.correct, 1);
        let (_, out) = console.into_inner();
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("not available"));
        assert!(transcript.contains(INVALID_INPUT));
    }

    #[test]
    fn report_carries_last_session_id() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        assert_eq!(engine.report(None, 3).session_id, None);

        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["q"]);
        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(engine.last_session(), Some(summary.session_id));
        assert_eq!(engine.report(None, 3).session_id, Some(summary.session_id));
    }

    #[test]
    fn input_closing_ends_the_session() {
        let mut engine = engine_with(&[("Algebra", "Square", "(a+b)²")]);
        let topics = topics(&engine);
        let mut console = ScriptedConsole::new(["Algebra", ""]);

        let summary = engine.start_drill(&topics, &mut console).unwrap();

        assert_eq!(summary.ended_by, EndReason::InputClosed);
        assert!(console.transcript().contains("Answer: (a+b)²"));
    }
}
