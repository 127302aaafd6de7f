/// Line-oriented text buffer with a fixed indent unit.
pub(crate) struct CodeWriter {
  out: String,
  unit: &'static str,
  depth: usize,
}

impl CodeWriter {
  pub(crate) fn new(unit: &'static str) -> Self {
    Self {
      out: String::new(),
      unit,
      depth: 0,
    }
  }

  /// Writes one line at the current depth. Empty lines carry no indentation.
  pub(crate) fn line(&mut self, text: impl AsRef<str>) {
    let text = text.as_ref();
    if !text.is_empty() {
      for _ in 0..self.depth {
        self.out.push_str(self.unit);
      }
      self.out.push_str(text);
    }
    self.out.push('\n');
  }

  pub(crate) fn lines<I, S>(&mut self, lines: I)
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for line in lines {
      self.line(line);
    }
  }

  pub(crate) fn blank(&mut self) {
    self.out.push('\n');
  }

  pub(crate) fn indent(&mut self) {
    self.depth += 1;
  }

  pub(crate) fn dedent(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  /// Writes `header`, then `body` one level deeper between braces on their own lines.
  pub(crate) fn braced(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
    self.line(header);
    self.line("{");
    self.indent();
    body(self);
    self.dedent();
    self.line("}");
  }

  pub(crate) fn finish(self) -> String {
    self.out
  }
}
