//! Terminal front end: prompts, raw-mode kana typing and lesson pages.

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use drill_core::kana::is_kana_answer;
use drill_core::{
    Aspect, DrillError, Feedback, Item, ItemId, ItemKind, KanaTranscoder, Prompt, Question,
    Result, Reviewer, SessionStats,
};

const BELL: &str = "\x07";

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::error!(%error, "failed to leave raw mode");
        }
    }
}

/// What a key press means for the line being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Submit,
    Bell,
    Interrupt,
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

fn is_modified(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Single-line input edited key by key in raw mode.
trait LineEditor {
    fn handle_key(&mut self, key: KeyEvent) -> KeyAction;
    fn render(&self) -> String;
}

impl LineEditor for KanaTranscoder {
    fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        handle_kana_key(self, key)
    }

    fn render(&self) -> String {
        KanaTranscoder::render(self)
    }
}

fn handle_kana_key(transcoder: &mut KanaTranscoder, key: KeyEvent) -> KeyAction {
    if is_interrupt(&key) {
        return KeyAction::Interrupt;
    }
    match key.code {
        KeyCode::Char(c) if !is_modified(&key) && c.is_ascii_graphic() => {
            transcoder.append_latin(c.encode_utf8(&mut [0; 4]));
            KeyAction::Continue
        }
        KeyCode::Backspace | KeyCode::Delete => {
            transcoder.delete_last();
            KeyAction::Continue
        }
        KeyCode::Enter if is_kana_answer(&transcoder.render()) => KeyAction::Submit,
        _ => KeyAction::Bell,
    }
}

/// Plain text, as typed.
#[derive(Debug, Default)]
struct TextInput {
    text: String,
    allow_empty: bool,
}

impl LineEditor for TextInput {
    fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        handle_text_key(self, key)
    }

    fn render(&self) -> String {
        self.text.clone()
    }
}

fn handle_text_key(input: &mut TextInput, key: KeyEvent) -> KeyAction {
    if is_interrupt(&key) {
        return KeyAction::Interrupt;
    }
    match key.code {
        KeyCode::Char(c) if !is_modified(&key) && !c.is_control() => {
            input.text.push(c);
            KeyAction::Continue
        }
        KeyCode::Backspace | KeyCode::Delete => {
            input.text.pop();
            KeyAction::Continue
        }
        KeyCode::Enter if input.allow_empty || !input.text.trim().is_empty() => {
            KeyAction::Submit
        }
        _ => KeyAction::Bell,
    }
}

/// Read one line in raw mode. Ctrl-C and Ctrl-D yield
/// `DrillError::Interrupted`.
fn read_edited<E: LineEditor>(label: &str, mut editor: E) -> Result<String> {
    let mut stdout = io::stdout();
    let guard = RawModeGuard::enable()?;
    execute!(stdout, Print(label))?;

    let answer = loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match editor.handle_key(key) {
            KeyAction::Continue => {}
            KeyAction::Submit => break editor.render(),
            KeyAction::Bell => {
                execute!(stdout, Print(BELL))?;
                continue;
            }
            KeyAction::Interrupt => return Err(DrillError::Interrupted),
        }

        queue!(
            stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(label),
            Print(editor.render())
        )?;
        stdout.flush()?;
    };

    drop(guard);
    println!();
    Ok(answer)
}

/// Type a reading: Latin keys are shown as kana as they are typed.
pub fn read_kana(label: &str) -> Result<String> {
    read_edited(label, KanaTranscoder::new())
}

/// Read one non-empty line.
pub fn read_line(label: &str) -> Result<String> {
    let line = read_edited(label, TextInput::default())?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; an empty answer picks `default`.
pub fn ask_yes_no(label: &str, default: bool) -> Result<bool> {
    let input = TextInput {
        allow_empty: true,
        ..TextInput::default()
    };
    let answer = read_edited(label, input)?;
    Ok(parse_yes_no(&answer, default))
}

fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Remove `<tag>` markup from mnemonics.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn progress_lines(stats: &SessionStats) -> String {
    let rate = stats
        .correct_rate()
        .map_or_else(|| "X".to_string(), |rate| rate.to_string());
    format!(
        "Progress: {}/{}\nCorrect rate: {rate}%",
        stats.completed, stats.total
    )
}

fn feedback_text(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Correct => "Correct!".to_string(),
        Feedback::TryAgain { wanted } => {
            format!("Try again. We are looking for the {wanted}.")
        }
        Feedback::CloseMatch { answers } => {
            format!("Your answer was a bit off. Answer: {answers}")
        }
        Feedback::Incorrect { answers, mnemonic } => match mnemonic {
            Some(mnemonic) => format!(
                "Wrong answer. Answer: {answers}\n\n{}",
                strip_markup(mnemonic)
            ),
            None => format!("Wrong answer. Answer: {answers}"),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LessonTab {
    Composition,
    Meaning,
    Reading,
    Context,
}

impl LessonTab {
    fn title(self) -> &'static str {
        match self {
            Self::Composition => "Composition",
            Self::Meaning => "Meaning",
            Self::Reading => "Reading",
            Self::Context => "Context",
        }
    }
}

fn lesson_tabs(kind: ItemKind) -> &'static [LessonTab] {
    match kind {
        ItemKind::Radical => &[LessonTab::Meaning],
        ItemKind::Kanji => &[LessonTab::Composition, LessonTab::Meaning, LessonTab::Reading],
        ItemKind::Vocabulary => &[
            LessonTab::Composition,
            LessonTab::Meaning,
            LessonTab::Reading,
            LessonTab::Context,
        ],
    }
}

fn answers_with_mnemonic(answers: String, mnemonic: Option<&str>) -> String {
    match mnemonic {
        Some(mnemonic) => format!("{answers}\n\n{}", strip_markup(mnemonic)),
        None => answers,
    }
}

/// Interactive reviewer on stdin/stdout.
#[derive(Default)]
pub struct TerminalReviewer {
    /// Component items shown on lesson composition pages.
    components: HashMap<ItemId, Item>,
}

impl TerminalReviewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(components: Vec<Item>) -> Self {
        Self {
            components: components.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    fn tab_content(&self, item: &Item, tab: LessonTab) -> String {
        match tab {
            LessonTab::Composition => {
                let parts: Vec<&Item> = item
                    .component_ids
                    .iter()
                    .filter_map(|id| self.components.get(id))
                    .collect();
                let Some(first) = parts.first() else {
                    return String::new();
                };
                let lines: Vec<String> = parts
                    .iter()
                    .map(|part| {
                        let meaning = part
                            .meanings()
                            .primary()
                            .map_or("?", |entry| entry.value.as_str());
                        format!("- {}: {meaning}", part.display_characters())
                    })
                    .collect();
                format!(
                    "This {} is made of {} {}:\n{}",
                    item.kind(),
                    parts.len(),
                    first.kind(),
                    lines.join("\n")
                )
            }
            LessonTab::Meaning => answers_with_mnemonic(
                item.meanings().answer_values(),
                item.mnemonic(Aspect::Meaning),
            ),
            LessonTab::Reading => answers_with_mnemonic(
                item.readings()
                    .map(|readings| readings.answer_values())
                    .unwrap_or_default(),
                item.mnemonic(Aspect::Reading),
            ),
            LessonTab::Context => item
                .context_sentences
                .iter()
                .map(|sentence| format!("{}\n{}", sentence.ja, sentence.en))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    fn render_lesson_page(&self, item: &Item, tabs: &[LessonTab], index: usize) -> String {
        let header: Vec<String> = tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == index {
                    format!("[{}]", tab.title())
                } else {
                    format!(" {} ", tab.title())
                }
            })
            .collect();
        format!(
            "{}:\n\n{}\n\n{}\n\n{}\n\nPress left/right or Enter to navigate the tabs.",
            capitalize(item.kind().as_str()),
            item.display_characters(),
            header.join(" "),
            self.tab_content(item, tabs[index]),
        )
    }
}

impl Reviewer for TerminalReviewer {
    fn present(&mut self, progress: &SessionStats, question: &Question) {
        println!(
            "\n{}\n\n{}\n",
            progress_lines(progress),
            question.item().display_characters()
        );
    }

    fn answer(&mut self, prompt: &Prompt) -> Result<String> {
        match prompt.aspect {
            Aspect::Reading => read_kana(&prompt.label),
            Aspect::Meaning => read_line(&prompt.label),
        }
    }

    fn accept_close_match(&mut self, _question: &Question) -> Result<bool> {
        ask_yes_no("Do you want to validate your answer? (Y/n) ", true)
    }

    fn claim_correct(&mut self, _question: &Question) -> Result<bool> {
        ask_yes_no("My answer was correct [y/N] ", false)
    }

    fn feedback(&mut self, feedback: Feedback) {
        println!("{}", feedback_text(&feedback));
    }

    fn teach(&mut self, item: &Item) -> Result<()> {
        let tabs = lesson_tabs(item.kind());
        let mut stdout = io::stdout();
        let mut index = 0;
        let _guard = RawModeGuard::enable()?;

        loop {
            // Raw mode needs explicit carriage returns
            let page = self.render_lesson_page(item, tabs, index).replace('\n', "\r\n");
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0), Print(page))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                _ if is_interrupt(&key) => return Err(DrillError::Interrupted),
                KeyCode::Right | KeyCode::Enter => {
                    index += 1;
                    if index == tabs.len() {
                        break;
                    }
                }
                KeyCode::Left => index = index.saturating_sub(1),
                _ => execute!(stdout, Print(BELL))?,
            }
        }

        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}
