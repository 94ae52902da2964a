#![allow(clippy::print_stdout, reason = "Example output")]
use docanchor_headers::{
  HeaderOptionsBuilder,
  HeaderProcessor,
  render_toc_markdown,
};

fn main() {
  let markdown = r"# Event Sourcing Primer

## Aggregates

### Commands {#aggregate-commands}

### Events

## Projections

### Events
";

  let processor = HeaderProcessor::new(
    HeaderOptionsBuilder::new()
      .anchor_symbol("¶")
      .skip_code_fences(true)
      .build(),
  );
  let result = processor.process(markdown);

  println!("Title: {:?}\n", result.title);
  for header in &result.headers {
    println!("h{} {:<24} {}", header.level, header.text, header.anchor());
  }

  println!("\n{}", render_toc_markdown(&result.table_of_contents(), 2, 3));
  println!("{}", result.content);
}
