use serde_json::{Map, Number, Value};

/// Field-emission sink for rendered results.
///
/// Results never produce output text themselves; they call the sink in a
/// fixed order and the sink decides the concrete document format.
pub trait DocumentSink {
    fn start_object(&mut self, name: &str);

    fn end_object(&mut self);

    /// `None` is emitted as an explicit null.
    fn field_number(&mut self, name: &str, value: Option<f64>);

    fn field_string(&mut self, name: &str, value: &str);

    fn field_value(&mut self, name: &str, value: &Value);
}

/// Builds an insertion-ordered JSON object.
#[derive(Debug, Default)]
pub struct JsonBuilder {
    // Bottom of the stack is the root object.
    stack: Vec<(String, Map<String, Value>)>,
}

impl JsonBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![(String::new(), Map::new())],
        }
    }

    fn current(&mut self) -> &mut Map<String, Value> {
        if self.stack.is_empty() {
            self.stack.push((String::new(), Map::new()));
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last].1
    }

    /// Closes any objects left open and returns the root.
    pub fn finish(mut self) -> Value {
        while self.stack.len() > 1 {
            self.end_object();
        }
        let root = self.stack.pop().map(|(_, map)| map).unwrap_or_default();
        Value::Object(root)
    }
}

impl DocumentSink for JsonBuilder {
    fn start_object(&mut self, name: &str) {
        self.current();
        self.stack.push((name.to_string(), Map::new()));
    }

    fn end_object(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some((name, map)) = self.stack.pop() {
            self.current().insert(name, Value::Object(map));
        }
    }

    fn field_number(&mut self, name: &str, value: Option<f64>) {
        // Non-finite doubles have no JSON form.
        let value = value
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number);
        self.current().insert(name.to_string(), value);
    }

    fn field_string(&mut self, name: &str, value: &str) {
        self.current()
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    fn field_value(&mut self, name: &str, value: &Value) {
        self.current().insert(name.to_string(), value.clone());
    }
}
