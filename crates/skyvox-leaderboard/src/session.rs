//! Line-oriented command session: one JSON command in, one JSON response out

use std::io::{self, BufRead, Write};

use crate::protocol::{BoardCommand, BoardHandler, BoardResponse};

/// Answer one raw command line. Blank lines yield `None`.
pub fn respond_line<H: BoardHandler + ?Sized>(handler: &mut H, line: &str) -> Option<BoardResponse> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<BoardCommand>(trimmed) {
        Ok(cmd) => {
            log::debug!("Board command: {:?}", cmd);
            handler.handle_command(cmd)
        }
        Err(e) => BoardResponse::error(format!("Invalid command JSON: {}", e)),
    };
    Some(response)
}

/// Serve commands from `reader` until end of input, writing one response
/// line per command. Returns the number of commands answered.
pub fn serve_lines<R, W, H>(reader: R, mut writer: W, handler: &mut H) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
    H: BoardHandler + ?Sized,
{
    let mut answered = 0;
    for line in reader.lines() {
        let line = line?;
        let Some(response) = respond_line(handler, &line) else {
            continue;
        };

        let resp_json = serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                "{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}",
                e
            )
        });
        writeln!(writer, "{}", resp_json)?;
        writer.flush()?;
        answered += 1;
    }
    Ok(answered)
}
