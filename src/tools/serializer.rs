use serde_json::{Map, Number, Value};

use crate::tools::output::{ForeignObject, ToolOutput};

/// Converts a tool result into a JSON tree. Never fails.
pub fn serialize(output: &ToolOutput) -> Value {
    match output {
        ToolOutput::Null => Value::Null,
        ToolOutput::Bool(b) => Value::Bool(*b),
        ToolOutput::Int(i) => Value::Number((*i).into()),
        ToolOutput::UInt(u) => Value::Number((*u).into()),
        // JSON has no NaN or infinity
        ToolOutput::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        ToolOutput::String(s) => Value::String(s.clone()),
        ToolOutput::Sequence(items) => Value::Array(items.iter().map(serialize).collect()),
        ToolOutput::Mapping(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), serialize(v)))
                .collect(),
        ),
        ToolOutput::Object(obj) => serialize_object(obj.as_ref()),
    }
}

fn serialize_object(obj: &dyn ForeignObject) -> Value {
    if let Some(dumped) = obj.dump() {
        return serialize(&dumped);
    }

    if let Some(attributes) = obj.attributes() {
        let map: Map<String, Value> = attributes
            .iter()
            .filter(|(name, _)| !name.starts_with('_'))
            .map(|(name, value)| (name.clone(), serialize(value)))
            .collect();
        return Value::Object(map);
    }

    Value::String(obj.describe())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct Socket;

    impl ForeignObject for Socket {
        fn describe(&self) -> String {
            "<socket fd=3>".to_string()
        }
    }

    #[derive(Debug)]
    struct Point {
        x: i64,
    }

    impl ForeignObject for Point {
        fn attributes(&self) -> Option<Vec<(String, ToolOutput)>> {
            Some(vec![
                ("x".to_string(), ToolOutput::Int(self.x)),
                ("_cache".to_string(), ToolOutput::object(Socket)),
            ])
        }
    }

    #[derive(Debug)]
    struct Dumpable;

    impl ForeignObject for Dumpable {
        fn dump(&self) -> Option<ToolOutput> {
            Some(ToolOutput::mapping([("kind", ToolOutput::from("dumped"))]))
        }

        fn attributes(&self) -> Option<Vec<(String, ToolOutput)>> {
            Some(vec![("kind".to_string(), ToolOutput::from("reflected"))])
        }
    }

    #[test]
    fn plain_data_passes_through() {
        let value = json!({
            "title": "Example",
            "count": 3,
            "ratio": 0.5,
            "ok": true,
            "missing": null,
            "tags": ["a", "b"]
        });
        assert_eq!(serialize(&ToolOutput::from(value.clone())), value);
    }

    #[test]
    fn large_unsigned_integers_stay_integers() {
        let value = json!({ "id": u64::MAX, "offset": i64::MIN });
        let out = serialize(&ToolOutput::from(value.clone()));
        assert_eq!(out, value);
        assert_eq!(out["id"].as_u64(), Some(u64::MAX));
        assert_eq!(serialize(&ToolOutput::from(u64::MAX)), json!(18446744073709551615u64));
    }

    #[test]
    fn public_attributes_are_reflected() {
        let out = serialize(&ToolOutput::object(Point { x: 5 }));
        assert_eq!(out, json!({ "x": 5 }));
    }

    #[test]
    fn dump_wins_over_attributes() {
        let out = serialize(&ToolOutput::object(Dumpable));
        assert_eq!(out, json!({ "kind": "dumped" }));
    }

    #[test]
    fn opaque_objects_become_strings() {
        let out = serialize(&ToolOutput::Sequence(vec![
            ToolOutput::object(Socket),
            ToolOutput::Float(f64::NAN),
        ]));
        assert_eq!(out, json!(["<socket fd=3>", "NaN"]));
    }
}
