use genrule_expand::MapProvider;

/// The dependencies every genrule test can see: one host tool, a few plain files and some
/// groups of them.
pub fn test_provider() -> MapProvider {
    MapProvider::new()
        .tool("tool", "out/tool")
        .files(":tool_files", vec!["tool_file1", "tool_file2"])
        .files(":1tool_file", vec!["tool_file1"])
        .files(":ins", vec!["in1", "in2"])
        .files(":1in", vec!["in1"])
        .files(":empty", Vec::<String>::new())
        .file("tool_file1")
        .file("tool_file2")
        .file("in1")
        .file("in2")
}
