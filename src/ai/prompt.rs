//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers. This is ideal since email
//! bodies fed into prompts should be considered untrusted.

use std::fmt;

use handlebars::Handlebars;

#[derive(Debug)]
pub enum Prompt {
    Categorize,
    ExtractEvent,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// Implement the Into trait so that Prompt can be converted to an &str
impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const CATEGORIZE_PROMPT: &str = r"
Classify the email below into exactly one category.

Categories:
1. Event: A specific activity that takes place at a concrete date and time. Must be something attendable (club meetings, hackathons, webinars, flights, interviews). NOT just a deadline.
2. Important: Requires direct action or contains crucial information (messages from a boss or professor, bills, grades, legal or medical updates).
3. Opportunity: Solicitations for jobs, scholarships, internships, or clubs. These may have deadlines but are not events you attend.
4. Unimportant: Newsletters, promotional spam, social media notifications, or generic blasts.

Prefer Event whenever the email plausibly describes a specific attendable occurrence with a concrete date and time, even if it also qualifies as Important or Opportunity.

In the reasoning field, explain your choice in one sentence. In the category field, give the single best matching category.

Email:
{{email}}
";

const EXTRACT_EVENT_PROMPT: &str = r"
Extract a specific, schedule-ready event from the email below.

Current reference date/time: {{date_context}} (use this to resolve relative dates like tomorrow or next Friday).

1. Title: create a concise but descriptive title of 3-7 words. Never a generic title like Meeting; prefer something like Project X Sync or Lunch with John.
2. Date and time: extract the start date and time. Extract the end time; if no end time or duration is mentioned, the end time MUST be exactly 1 hour after the start time. The start time and end time must NEVER be the same.
3. Location: the physical place or video link, if one is given.
4. Description: summarize the agenda and participants from the email, including any location or link details.

Email:
{{email}}
";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::Categorize.to_string(), CATEGORIZE_PROMPT)
        .expect("Failed to register template");
    registry
        .register_template_string(&Prompt::ExtractEvent.to_string(), EXTRACT_EVENT_PROMPT)
        .expect("Failed to register template");
    registry
}
