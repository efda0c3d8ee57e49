//! Fixed instructional templates.

/// Default system prompt for normal chat mode.
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. \
Answer the user's questions clearly and concisely. \
Reply in the language the user writes in.";

/// System directive for the SQL generation stage.
pub const SQL_EXPERT_DIRECTIVE: &str =
    "You are a SQL expert. Generate only valid SQL, with no explanations.";

/// System directive for the result interpretation stage.
pub const DATA_ANALYST_DIRECTIVE: &str =
    "You are a data analyst. Explain query results clearly to a non-technical reader.";

/// Schema of the table the generated queries run against.
pub const MESSAGES_SCHEMA: &str = "\
Table messages (SQLite):
- id INTEGER PRIMARY KEY -- monotonic message id
- user_id INTEGER -- speaker identity (0 = web chat / system)
- chat_id INTEGER -- conversation thread
- role TEXT -- 'user' or 'assistant'
- content TEXT -- message text
- content_length INTEGER -- length of content in characters
- username TEXT -- display name
- created_at TEXT -- ISO-8601 UTC timestamp, e.g. 2026-01-31T12:00:00.000+00:00
- is_deleted BOOLEAN -- 1 when the user cleared their history";

/// Builds the SQL generation request for a natural-language question.
pub fn text_to_sql_prompt(question: &str) -> String {
    format!(
        "You translate questions about a chat bot's usage statistics into SQL.\n\n\
         {schema}\n\n\
         Rules:\n\
         - Write exactly one SELECT statement for SQLite.\n\
         - Never modify data (no INSERT, UPDATE, DELETE, DROP, ALTER, PRAGMA).\n\
         - Use date(created_at) / datetime('now') for date arithmetic.\n\
         - Return only the SQL statement, with no comments or explanations.\n\n\
         Question: {question}\n\n\
         SQL:",
        schema = MESSAGES_SCHEMA,
        question = question,
    )
}

/// Builds the interpretation request from the question, the executed SQL and serialized rows.
pub fn interpret_results_prompt(question: &str, sql: &str, results: &str) -> String {
    format!(
        "A user asked a question about the chat bot's statistics. \
         The question was answered by running a SQL query.\n\n\
         Question: {question}\n\n\
         SQL query:\n{sql}\n\n\
         Query results (JSON):\n{results}\n\n\
         Explain the answer to the question in plain language, based only on these results. \
         Mention the concrete numbers. If the results are empty, say that no matching data was found.",
        question = question,
        sql = sql,
        results = results,
    )
}
