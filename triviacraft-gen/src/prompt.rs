//! The trivia prompt template

/// Placeholder replaced by the topic line.
const TOPIC_SLOT: &str = "{topic}";

/// Rendered in place of an empty topic.
const ANY_TOPIC: &str = "any topic of your choosing";

/// Instructions sent to the model. `{topic}` is filled in by [`trivia_prompt`].
pub const TRIVIA_TEMPLATE: &str = r#"I want to create a trivia question about {topic}. Follow these steps to create one:

1. Find an interesting fact.

2. Choose an answer from the fact. Ideally the answer is an entity, a person, a company, a date or similar. Not a long sentence.

3. Find the background story and other relevant details around the answer.

4. Combine all the info into a trivia question written so that the answer is not given away.

Example:
X WAS BORN IN 1965 IN A SUBURB OF TOKYO AND HAD A HOBBY OF COLLECTING INSECTS, EARNING HIM THE
NICKNAME "DR. BUG". AT THE AGE OF 17, X PUBLISHED A MAGAZINE SPECIALIZING IN VIDEO GAMES CALLED
GAME FREAK AND LATER FOUNDED A VIDEO GAME COMPANY NAMED AFTER IT.
X PITCHED A NEW GAME IDEA TO Y, WHO WAS WITH NINTENDO AT THE TIME. AFTER A TROUBLED DEVELOPMENT
THE GAME LAUNCHED IN FEBRUARY 1996, AND AN ANIME ADAPTATION PREMIERED ON 1 APRIL 1997.
THE PROTAGONIST OF THE ANIME SHARES THE SAME NAME AS X IN THE ORIGINAL VERSION.
WHICH ANIME ARE WE TALKING ABOUT?

Format the output exactly as a JSON object with two keys: "question" and "answer".
{
"question": A detailed, intriguing paragraph that sets up the trivia question without revealing the answer. It should be engaging and long-form.
"answer": The concise answer to the question, followed by a brief one-sentence interesting fact.
}
Do not use Markdown code blocks for the JSON. Just return the raw JSON string."#;

/// Render the prompt for `topic`.
///
/// The topic is inserted verbatim; an empty (or blank) topic lets the model
/// pick one.
pub fn trivia_prompt(topic: &str) -> String {
    let topic = topic.trim();
    let topic = if topic.is_empty() { ANY_TOPIC } else { topic };
    TRIVIA_TEMPLATE.replacen(TOPIC_SLOT, topic, 1)
}
