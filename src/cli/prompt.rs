use crate::report::ReportChoice;
use anyhow::Context;
use std::io::{BufRead, Write};

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> anyhow::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read from stdin")?;
    Ok(answer.trim().to_string())
}

/// Asks for one URL or a comma separated list.
///
/// Returns `None` when the menu choice is not recognised.
pub fn prompt_urls<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<Vec<String>>> {
    let choice = ask(
        input,
        output,
        "1. Single Video\n2. Bulk Video Input (Comma Separated)\nChoose option (1/2): ",
    )?;

    let urls = match choice.as_str() {
        "1" => vec![ask(input, output, "Enter Video URL: ")?],
        "2" => ask(input, output, "Enter Video URLs (comma separated): ")?
            .split(',')
            .map(|url| url.trim().to_string())
            .collect(),
        _ => return Ok(None),
    };

    Ok(Some(urls.into_iter().filter(|url| !url.is_empty()).collect()))
}

/// Asks which report to produce. Returns `None` for an unknown choice.
pub fn prompt_report_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<ReportChoice>> {
    let answer = ask(
        input,
        output,
        "\nChoose report format:\n1. JSON\n2. CSV\n3. PDF\n4. HTML\n5. All Formats\nEnter option (1/2/3/4/5): ",
    )?;
    Ok(answer.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_urls(answers: &str) -> Option<Vec<String>> {
        let mut input = answers.as_bytes();
        let mut output = Vec::new();
        prompt_urls(&mut input, &mut output).unwrap()
    }

    #[test]
    fn test_single_url() {
        assert_eq!(
            run_urls("1\nhttps://www.youtube.com/watch?v=a\n"),
            Some(vec!["https://www.youtube.com/watch?v=a".to_string()])
        );
    }

    #[test]
    fn test_bulk_urls_are_trimmed() {
        assert_eq!(
            run_urls("2\n a , b,,c \n"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_invalid_option() {
        assert_eq!(run_urls("3\n"), None);
        assert_eq!(run_urls(""), None);
    }

    #[test]
    fn test_report_choice() {
        let mut output = Vec::new();
        let choice = prompt_report_choice(&mut "4\n".as_bytes(), &mut output).unwrap();
        assert_eq!(choice, Some(ReportChoice::Html));
        assert!(String::from_utf8(output).unwrap().contains("5. All Formats"));

        let choice = prompt_report_choice(&mut "9\n".as_bytes(), &mut Vec::new()).unwrap();
        assert_eq!(choice, None);
    }
}
