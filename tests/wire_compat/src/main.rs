fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use filedrop_protocol::{FileEntry, FilesResponse, UploadResponse};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized =
            serde_json::to_value(&parsed).unwrap_or_else(|e| panic!("failed to serialize {name}: {e}"));

        assert_eq!(fixture, reserialized, "wire mismatch for {name}");
    }

    #[test]
    fn files_response_roundtrip() {
        roundtrip_test::<FilesResponse>("files_response.json");
    }

    #[test]
    fn file_entry_roundtrip() {
        roundtrip_test::<FileEntry>("file_entry.json");
    }

    #[test]
    fn upload_response_roundtrip() {
        roundtrip_test::<UploadResponse>("upload_response.json");
    }

    #[test]
    fn listing_field_names_match_the_wire() {
        let fixture = load_fixture("files_response.json");
        let first = &fixture["files"][0];

        // Keys the server actually sends; a rename here breaks the contract.
        assert!(first.get("name").is_some());
        assert!(first.get("size").is_some());
    }

    #[test]
    fn upload_response_uses_message_key() {
        let fixture = load_fixture("upload_response.json");
        assert_eq!(
            fixture["message"].as_str(),
            Some("File uploaded successfully")
        );
    }
}
