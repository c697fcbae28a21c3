/// A set of optional predicates narrowing the candidate set before sampling.
///
/// Absent fields impose no constraint; a default spec matches every record.
/// String predicates compare ASCII case-insensitively, the numeric bounds are
/// inclusive, and `user_agent_pattern` is a regular expression applied
/// case-insensitively to the record's `user_agent`. A spec is built per call
/// and consumed read-only; applying the same spec twice yields the same
/// result set.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub platform: Option<String>,
    pub vendor: Option<String>,
    pub user_agent_pattern: Option<String>,
    pub min_screen_width: Option<u32>,
    pub max_screen_width: Option<u32>,
    pub min_screen_height: Option<u32>,
    pub max_screen_height: Option<u32>,
    pub connection_type: Option<String>,
    pub effective_connection_type: Option<String>,
}
