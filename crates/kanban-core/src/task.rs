use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Backlog,
    Todo,
    Doing,
    Done,
}

impl Column {
    /// Columns in board order. This is also the discovery order used when
    /// walking a `TaskList`.
    pub fn all() -> &'static [Column] {
        &[Column::Backlog, Column::Todo, Column::Doing, Column::Done]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Backlog => "backlog",
            Column::Todo => "todo",
            Column::Doing => "doing",
            Column::Done => "done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Column {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Column::Backlog),
            "todo" => Ok(Column::Todo),
            "doing" => Ok(Column::Doing),
            "done" => Ok(Column::Done),
            other => Err(KanbanError::InvalidColumn(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// One checklist item, read leniently from a task's `todos` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub texto: String,
    pub done: bool,
}

/// A recorded column transition, borrowed from the stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEvent<'a> {
    /// ISO-8601 timestamp, exactly as written.
    pub timestamp: &'a str,
    pub coluna: Column,
}

/// A task as stored in tasks.json.
///
/// The JSON object is kept whole. The accessors below interpret the fields
/// the board knows about, and anything they cannot interpret (a numeric id,
/// an event naming an unknown column, a field of another type, keys written
/// by other tools) is still written back unchanged on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task {
    fields: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<String>, descricao: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), Value::String(id.into()));
        fields.insert("descricao".into(), Value::String(descricao.into()));
        Self { fields }
    }

    /// Wrap a stored entry. `None` unless `value` is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// The validation filter: truthy `id` and truthy `descricao`.
    pub fn is_valid(&self) -> bool {
        self.fields.get("id").is_some_and(is_truthy)
            && self.fields.get("descricao").is_some_and(is_truthy)
    }

    /// The id as text. Numeric ids (as written by `Date.now()`) render as digits.
    pub fn id(&self) -> Cow<'_, str> {
        text(self.fields.get("id")).unwrap_or(Cow::Borrowed(""))
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id() == id
    }

    pub fn descricao(&self) -> Cow<'_, str> {
        text(self.fields.get("descricao")).unwrap_or(Cow::Borrowed(""))
    }

    pub fn detalhes(&self) -> Option<&str> {
        self.fields.get("detalhes").and_then(Value::as_str)
    }

    /// Milestone id, when set to a non-empty string or a number.
    pub fn milestone(&self) -> Option<Cow<'_, str>> {
        text(self.fields.get("milestone")).filter(|m| !m.is_empty())
    }

    /// Any stored field, interpreted or not.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn todos(&self) -> Vec<TodoItem> {
        self.fields
            .get("todos")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| TodoItem {
                        texto: text(item.get("texto")).unwrap_or_default().into_owned(),
                        done: item.get("done").is_some_and(is_truthy),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Recorded transitions in stored order. Events without a string
    /// timestamp or with an unknown `coluna` are skipped here but stay on disk.
    pub fn timeline_events(&self) -> impl Iterator<Item = TimelineEvent<'_>> {
        self.fields
            .get("timeline")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|event| {
                let timestamp = event.get("timestamp")?.as_str()?;
                let coluna = event.get("coluna")?.as_str()?.parse().ok()?;
                Some(TimelineEvent { timestamp, coluna })
            })
    }

    pub fn set_descricao(&mut self, descricao: String) {
        self.fields.insert("descricao".into(), Value::String(descricao));
    }

    /// `None` removes the field.
    pub fn set_detalhes(&mut self, detalhes: Option<String>) {
        self.set_optional("detalhes", detalhes);
    }

    /// `None` removes the field.
    pub fn set_milestone(&mut self, milestone: Option<String>) {
        self.set_optional("milestone", milestone);
    }

    fn set_optional(&mut self, key: &str, value: Option<String>) {
        match value {
            Some(v) => {
                self.fields.insert(key.into(), Value::String(v));
            }
            None => {
                self.fields.shift_remove(key);
            }
        }
    }

    pub fn push_event(&mut self, timestamp: String, coluna: Column) {
        let event = serde_json::json!({ "timestamp": timestamp, "coluna": coluna });
        match self.fields.get_mut("timeline") {
            Some(Value::Array(events)) => events.push(event),
            Some(other) => {
                tracing::warn!(timeline = %other, "replacing non-array timeline");
                *other = Value::Array(vec![event]);
            }
            None => {
                self.fields.insert("timeline".into(), Value::Array(vec![event]));
            }
        }
    }

    /// Flip `done` on checklist item `index`. False when there is no such item.
    pub fn toggle_todo(&mut self, index: usize) -> bool {
        let Some(item) = self
            .fields
            .get_mut("todos")
            .and_then(Value::as_array_mut)
            .and_then(|items| items.get_mut(index))
            .and_then(Value::as_object_mut)
        else {
            return false;
        };
        let done = item.get("done").is_some_and(is_truthy);
        item.insert("done".into(), Value::Bool(!done));
        true
    }
}

/// Strings as-is, numbers as digits, null and absent as `None`, anything
/// else as its JSON text.
fn text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// New task id for tasks created without one.
pub fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// TaskList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskList {
    pub backlog: Vec<Task>,
    pub todo: Vec<Task>,
    pub doing: Vec<Task>,
    pub done: Vec<Task>,
}

impl<'de> Deserialize<'de> for TaskList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl TaskList {
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Backlog => &self.backlog,
            Column::Todo => &self.todo,
            Column::Doing => &self.doing,
            Column::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Backlog => &mut self.backlog,
            Column::Todo => &mut self.todo,
            Column::Doing => &mut self.doing,
            Column::Done => &mut self.done,
        }
    }

    /// Every task paired with its column, in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Task)> {
        Column::all()
            .iter()
            .flat_map(move |&c| self.column(c).iter().map(move |t| (c, t)))
    }

    pub fn len(&self) -> usize {
        Column::all().iter().map(|&c| self.column(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First task with `id`, searching columns in board order.
    pub fn find(&self, id: &str) -> Option<(Column, &Task)> {
        self.iter().find(|(_, t)| t.has_id(id))
    }

    /// Drop tasks failing [`Task::is_valid`] from every column. Idempotent.
    pub fn retain_valid(&mut self) {
        for &c in Column::all() {
            self.column_mut(c).retain(Task::is_valid);
        }
    }

    /// Build a task list from an arbitrary JSON value.
    ///
    /// Anything that is not an object yields the empty board and a column
    /// that is not an array yields an empty column. Entries are kept if and
    /// only if they are objects with a truthy `id` and `descricao`.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let mut list = Self::default();
        for &c in Column::all() {
            if let Some(entries) = obj.get(c.as_str()).and_then(Value::as_array) {
                *list.column_mut(c) = entries.iter().filter_map(parse_entry).collect();
            }
        }
        list
    }
}

fn parse_entry(entry: &Value) -> Option<Task> {
    let task = Task::from_value(entry.clone()).filter(Task::is_valid);
    if task.is_none() {
        tracing::debug!(entry = %entry, "dropping task without id or descricao");
    }
    task
}

/// JavaScript-style truthiness, which is what the files were written against.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse tasks.json text. Corrupt input yields the empty board.
pub fn parse_tasks(raw: &str) -> TaskList {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => TaskList::from_value(&value),
        Err(e) => {
            tracing::warn!(error = %e, "tasks.json is not valid JSON, using an empty board");
            TaskList::default()
        }
    }
}

/// Serialize a task list the way tasks.json is stored: two-space pretty JSON.
pub fn to_json_pretty(tasks: &TaskList) -> crate::error::Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mixed() -> Value {
        json!({
            "backlog": [
                {"id": "a", "descricao": "Write docs"},
                {"id": "", "descricao": "empty id"},
                null,
                "not an object",
                {"descricao": "no id"}
            ],
            "todo": [
                {"id": "b", "descricao": "Ship", "detalhes": "v1", "milestone": "m1"},
                {"id": "c"}
            ],
            "doing": [
                {"id": "d", "descricao": "", "timeline": []}
            ],
            "done": [
                {"id": "e", "descricao": "Done thing", "todos": [{"texto": "x", "done": true}]}
            ]
        })
    }

    #[test]
    fn column_round_trips_through_str() {
        for &c in Column::all() {
            assert_eq!(c.as_str().parse::<Column>().unwrap(), c);
        }
        assert!(matches!(
            "archived".parse::<Column>(),
            Err(KanbanError::InvalidColumn(_))
        ));
    }

    #[test]
    fn invalid_entries_are_dropped() {
        let list = TaskList::from_value(&mixed());
        let ids: Vec<String> = list.iter().map(|(_, t)| t.id().into_owned()).collect();
        assert_eq!(ids, vec!["a", "b", "e"]);
        assert!(list.doing.is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let once = TaskList::from_value(&mixed());
        let twice = TaskList::from_value(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);

        let mut retained = once.clone();
        retained.retain_valid();
        retained.retain_valid();
        assert_eq!(retained, once);
    }

    #[test]
    fn retain_valid_drops_empty_fields() {
        let mut list = TaskList::default();
        list.todo.push(Task::new("1", "ok"));
        list.todo.push(Task::new("", "no id"));
        list.done.push(Task::new("2", ""));
        list.retain_valid();
        assert_eq!(list.len(), 1);
        assert_eq!(list.todo[0].id(), "1");
    }

    #[test]
    fn corrupt_json_yields_empty_board() {
        let list = parse_tasks("{ this is not json");
        assert_eq!(list, TaskList::default());
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            json!({"backlog": [], "todo": [], "doing": [], "done": []})
        );
    }

    #[test]
    fn non_object_root_yields_empty_board() {
        assert!(parse_tasks("[1, 2, 3]").is_empty());
        assert!(parse_tasks("null").is_empty());
    }

    #[test]
    fn missing_column_is_empty() {
        let list = parse_tasks(r#"{"todo": [{"id": "x", "descricao": "y"}]}"#);
        assert_eq!(list.todo.len(), 1);
        assert!(list.backlog.is_empty());
        assert!(list.done.is_empty());
    }

    #[test]
    fn duplicate_ids_across_columns_are_kept() {
        let list = parse_tasks(
            r#"{"todo": [{"id": "x", "descricao": "y"}], "done": [{"id": "x", "descricao": "y"}]}"#,
        );
        assert_eq!(list.todo.len(), 1);
        assert_eq!(list.done.len(), 1);
        assert_eq!(list.find("x").map(|(c, _)| c), Some(Column::Todo));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"backlog": [{"id": "a", "descricao": "b", "prioridade": "alta"}]}"#;
        let list = parse_tasks(raw);
        assert_eq!(list.backlog[0].get("prioridade"), Some(&json!("alta")));
        let out = to_json_pretty(&list).unwrap();
        assert!(out.contains("\"prioridade\": \"alta\""));
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let mut list = TaskList::default();
        list.todo.push(Task::new("1", "one"));
        let out = to_json_pretty(&list).unwrap();
        assert!(out.starts_with("{\n  \"backlog\": [],\n  \"todo\": [\n    {\n      \"id\": \"1\""));
        assert!(!out.contains("detalhes"));
    }

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn numeric_id_is_kept() {
        let list = parse_tasks(r#"{"todo": [{"id": 1729000000000, "descricao": "from Date.now"}]}"#);
        assert_eq!(list.len(), 1);
        assert_eq!(list.todo[0].id(), "1729000000000");
        assert!(list.todo[0].has_id("1729000000000"));
        let out = to_json_pretty(&list).unwrap();
        assert!(out.contains("\"id\": 1729000000000"));
    }

    #[test]
    fn unknown_event_column_keeps_the_task() {
        let list = parse_tasks(
            r#"{"done": [{"id": "a", "descricao": "old", "timeline": [
                {"timestamp": "2026-10-01T10:00:00Z", "coluna": "archived"},
                {"timestamp": "2026-10-02T10:00:00Z", "coluna": "done"},
                {"coluna": "todo"}
            ]}]}"#,
        );
        assert_eq!(list.done.len(), 1);
        let events: Vec<_> = list.done[0].timeline_events().collect();
        assert_eq!(
            events,
            vec![TimelineEvent {
                timestamp: "2026-10-02T10:00:00Z",
                coluna: Column::Done,
            }]
        );
        assert_eq!(list.done[0].get("timeline").unwrap().as_array().unwrap().len(), 3);
    }

    #[test]
    fn mistyped_optional_fields_keep_the_task() {
        let entry = json!({"id": "a", "descricao": "x", "detalhes": 5, "todos": "none", "milestone": 3});
        let list = TaskList::from_value(&json!({ "backlog": [entry.clone()] }));
        let task = &list.backlog[0];
        assert_eq!(task.detalhes(), None);
        assert!(task.todos().is_empty());
        assert_eq!(task.milestone().as_deref(), Some("3"));
        assert_eq!(serde_json::to_value(task).unwrap(), entry);
    }

    #[test]
    fn truthy_non_string_descricao_is_kept() {
        let list = parse_tasks(r#"{"todo": [{"id": "n", "descricao": 7}]}"#);
        assert_eq!(list.todo[0].descricao(), "7");
    }

    #[test]
    fn key_order_is_preserved() {
        let raw = r#"{"backlog": [{"descricao": "b", "zeta": 1, "id": "a"}]}"#;
        let out = to_json_pretty(&parse_tasks(raw)).unwrap();
        let d = out.find("descricao").unwrap();
        let z = out.find("zeta").unwrap();
        let i = out.find("\"id\"").unwrap();
        assert!(d < z && z < i);
    }

    #[test]
    fn setters_and_checklist() {
        let mut task = Task::from_value(json!({
            "id": "t", "descricao": "x", "detalhes": "d",
            "todos": [{"texto": "one"}, {"texto": "two", "done": true}]
        }))
        .unwrap();
        assert_eq!(
            task.todos(),
            vec![
                TodoItem { texto: "one".into(), done: false },
                TodoItem { texto: "two".into(), done: true },
            ]
        );
        assert!(task.toggle_todo(0));
        assert!(task.todos()[0].done);
        assert!(!task.toggle_todo(9));

        task.set_detalhes(None);
        assert!(task.get("detalhes").is_none());
        task.set_milestone(Some("m1".into()));
        assert_eq!(task.milestone().as_deref(), Some("m1"));
        task.push_event("2026-10-19T12:00:00.000Z".into(), Column::Doing);
        assert_eq!(task.timeline_events().count(), 1);
    }

    #[test]
    fn tasklist_deserialize_is_lenient() {
        let list: TaskList =
            serde_json::from_str(r#"{"todo": [null, {"id": "a", "descricao": "ok"}], "done": 4}"#)
                .unwrap();
        assert_eq!(list.len(), 1);
    }
}
