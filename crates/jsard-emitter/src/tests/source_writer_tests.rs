use super::SourceWriter;

#[test]
fn test_indentation_is_lazy() {
    let mut writer = SourceWriter::new(2);
    writer.write("{");
    writer.increase_indent();
    writer.write_line();
    writer.write("a;");
    writer.decrease_indent();
    writer.write_line();
    writer.write("}");
    assert_eq!(writer.get_output(), "{\n  a;\n}");
}

#[test]
fn test_blank_lines_carry_no_indent() {
    let mut writer = SourceWriter::new(4);
    writer.increase_indent();
    writer.write_line();
    writer.write_line();
    writer.write("x");
    assert_eq!(writer.take_output(), "\n\n    x");
}

#[test]
fn test_decrease_indent_saturates() {
    let mut writer = SourceWriter::new(2);
    writer.decrease_indent();
    assert_eq!(writer.indent_level(), 0);
    writer.write("a");
    writer.write_space();
    writer.write_char('b');
    writer.write("");
    assert_eq!(writer.get_output(), "a b");
    assert_eq!(writer.len(), 3);
}
