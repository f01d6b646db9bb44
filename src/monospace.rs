//! A fixed-advance text backend.
//!
//! [MonospaceLayout] breaks text into lines the simplest way possible: every
//! character is the same width, lines wrap at the character that would
//! overflow, and a `'\n'` always ends a line. Directionality is resolved with
//! the Unicode bidirectional algorithm, so mixed left-to-right and
//! right-to-left text is ordered and aligned the way a real backend would.
//!
//! When `max_lines` is set and the text needs more lines, the last allowed
//! line absorbs the rest of the text and ends in an ellipsis.

use crate::error::LayoutError;
use crate::line_layout::{Direction, LineLayout};
use crate::units::Px;
use unicode_bidi::BidiInfo;

/// Sizing of a [MonospaceLayout]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceMetrics {
    /// Horizontal advance of every character
    pub advance: Px,
    /// Width text wraps at
    pub wrap_width: Px,
    /// Distance between consecutive baselines
    pub line_height: Px,
    /// Distance from the top of a line to its baseline
    pub ascent: Px,
    /// Lines after this many are ellipsized away
    pub max_lines: Option<usize>,
}

impl MonospaceMetrics {
    /// Metrics where lines are twice as tall as a character is wide, with the
    /// baseline at 80% of that height
    pub fn new(advance: Px, wrap_width: Px) -> MonospaceMetrics {
        MonospaceMetrics {
            advance,
            wrap_width,
            line_height: advance * 2.0,
            ascent: advance * 1.6,
            max_lines: None,
        }
    }

    pub fn with_line_height(self, line_height: Px, ascent: Px) -> MonospaceMetrics {
        MonospaceMetrics {
            line_height,
            ascent,
            ..self
        }
    }

    pub fn with_max_lines(self, max_lines: usize) -> MonospaceMetrics {
        MonospaceMetrics {
            max_lines: Some(max_lines),
            ..self
        }
    }

    fn chars_per_line(&self) -> usize {
        if *self.advance <= 0.0 {
            return usize::MAX;
        }
        ((*self.wrap_width / *self.advance).floor() as usize).max(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    start: usize,
    end: usize,
    ellipsis_start: usize,
    ellipsis_count: usize,
    direction: Direction,
    left: Px,
    width: Px,
    max: Px,
}

/// Line geometry for text set in a single fixed-advance font
#[derive(Debug, Clone)]
pub struct MonospaceLayout {
    metrics: MonospaceMetrics,
    chars: Vec<char>,
    rtl: Vec<bool>,
    /// Left edge of every character that is actually drawn
    positions: Vec<Option<Px>>,
    lines: Vec<Line>,
}

impl MonospaceLayout {
    pub fn new(text: &str, metrics: MonospaceMetrics) -> MonospaceLayout {
        let chars: Vec<char> = text.chars().collect();
        let mut byte_of: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        byte_of.push(text.len());

        let bidi = BidiInfo::new(text, None);
        let rtl: Vec<bool> = byte_of[..chars.len()]
            .iter()
            .map(|&b| bidi.levels.get(b).is_some_and(|level| level.is_rtl()))
            .collect();

        let mut layout = MonospaceLayout {
            metrics,
            positions: vec![None; chars.len()],
            lines: Vec::new(),
            chars,
            rtl,
        };

        let breaks = layout.break_lines();
        for (start, end, ellipsis) in breaks {
            let line = layout.lay_out_line(&bidi, &byte_of, start, end, ellipsis);
            layout.lines.push(line);
        }

        layout
    }

    /// Line ranges, plus where the ellipsis starts on an ellipsized line
    fn break_lines(&self) -> Vec<(usize, usize, Option<usize>)> {
        let n = self.chars.len();
        let per_line = self.metrics.chars_per_line();
        let mut breaks: Vec<(usize, usize, Option<usize>)> = Vec::new();

        let mut i = 0;
        while i < n {
            let start = i;
            let mut count = 0;
            while i < n {
                if self.chars[i] == '\n' {
                    i += 1;
                    break;
                }
                if count == per_line {
                    break;
                }
                i += 1;
                count += 1;
            }
            breaks.push((start, i, None));
        }
        // a trailing newline (or no text at all) still leaves an empty line
        if n == 0 || self.chars[n - 1] == '\n' {
            breaks.push((n, n, None));
        }

        if let Some(max_lines) = self.metrics.max_lines {
            let max_lines = max_lines.max(1);
            if breaks.len() > max_lines {
                breaks.truncate(max_lines);
                if let Some(last) = breaks.last_mut() {
                    let (start, end, _) = *last;
                    let mut kept = end - start;
                    if kept > 0 && self.chars[end - 1] == '\n' {
                        kept -= 1;
                    }
                    // room for the ellipsis itself
                    let kept = kept.min(per_line.saturating_sub(1));
                    *last = (start, n, Some(kept));
                }
            }
        }

        breaks
    }

    fn lay_out_line(
        &mut self,
        bidi: &BidiInfo,
        byte_of: &[usize],
        start: usize,
        end: usize,
        ellipsis: Option<usize>,
    ) -> Line {
        let advance = self.metrics.advance;

        let visible_end = match ellipsis {
            Some(kept) => start + kept,
            None if end > start && self.chars[end - 1] == '\n' => end - 1,
            None => end,
        };
        let visible = visible_end - start;
        let glyphs = visible + usize::from(ellipsis.is_some());

        let paragraph = bidi
            .paragraphs
            .iter()
            .find(|p| p.range.contains(&byte_of[start]))
            .or_else(|| bidi.paragraphs.last());
        let direction = match paragraph {
            Some(p) if p.level.is_rtl() => Direction::Rtl,
            _ => Direction::Ltr,
        };

        let max = advance * glyphs as f32;
        let trailing = if ellipsis.is_some() {
            0
        } else {
            self.chars[start..visible_end]
                .iter()
                .rev()
                .take_while(|c| c.is_whitespace())
                .count()
        };
        let width = advance * (glyphs - trailing) as f32;
        let left = match direction {
            Direction::Ltr => Px(0.0),
            Direction::Rtl => self.metrics.wrap_width - max,
        };

        if let Some(paragraph) = paragraph.filter(|_| visible > 0) {
            let (levels, runs) = bidi.visual_runs(paragraph, byte_of[start]..byte_of[visible_end]);

            // the ellipsis sits at the far end in reading direction
            let mut slot = usize::from(ellipsis.is_some() && direction.is_rtl());
            for run in runs {
                let from = byte_of.partition_point(|&b| b < run.start);
                let to = byte_of.partition_point(|&b| b < run.end);
                let run_rtl = levels.get(run.start).is_some_and(|level| level.is_rtl());
                let indices: Box<dyn Iterator<Item = usize>> = if run_rtl {
                    Box::new((from..to).rev())
                } else {
                    Box::new(from..to)
                };
                for ci in indices {
                    self.positions[ci] = Some(left + advance * slot as f32);
                    slot += 1;
                }
            }
        }

        Line {
            start,
            end,
            ellipsis_start: ellipsis.unwrap_or(0),
            ellipsis_count: ellipsis.map(|kept| end - start - kept).unwrap_or(0),
            direction,
            left,
            width,
            max,
        }
    }

    fn line(&self, line: usize) -> Result<&Line, LayoutError> {
        self.lines.get(line).ok_or(LayoutError::LineOutOfRange {
            line,
            count: self.lines.len(),
        })
    }

    fn check_offset(&self, offset: usize) -> Result<(), LayoutError> {
        if offset > self.chars.len() {
            return Err(LayoutError::OffsetOutOfRange {
                offset,
                len: self.chars.len(),
            });
        }
        Ok(())
    }

    /// Horizontal position of `offset` as a cursor inserting text in
    /// `direction`: the leading edge of the character in that direction, or
    /// the end of the line for characters that aren't drawn
    fn cursor(&self, offset: usize, direction: Direction) -> Result<Px, LayoutError> {
        let line = self.line(self.line_for_offset(offset)?)?;
        match self.positions.get(offset).copied().flatten() {
            Some(left) if direction.is_rtl() => Ok(left + self.metrics.advance),
            Some(left) => Ok(left),
            None if line.direction.is_rtl() => Ok(line.left),
            None => Ok(line.left + line.max),
        }
    }

    fn direction_of(&self, offset: usize) -> Direction {
        if self.rtl.get(offset).copied().unwrap_or(false) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

impl LineLayout for MonospaceLayout {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_for_offset(&self, offset: usize) -> Result<usize, LayoutError> {
        self.check_offset(offset)?;
        let after = self.lines.partition_point(|l| l.start <= offset);
        Ok(after.saturating_sub(1))
    }

    fn line_for_vertical(&self, y: Px) -> Result<usize, LayoutError> {
        let last = self.lines.len().saturating_sub(1);
        if *y <= 0.0 || *self.metrics.line_height <= 0.0 {
            return Ok(0);
        }
        let line = (*y / *self.metrics.line_height).floor() as usize;
        Ok(line.min(last))
    }

    fn line_start(&self, line: usize) -> Result<usize, LayoutError> {
        Ok(self.line(line)?.start)
    }

    fn line_end(&self, line: usize) -> Result<usize, LayoutError> {
        Ok(self.line(line)?.end)
    }

    fn ellipsis_count(&self, line: usize) -> Result<usize, LayoutError> {
        Ok(self.line(line)?.ellipsis_count)
    }

    fn ellipsis_start(&self, line: usize) -> Result<usize, LayoutError> {
        Ok(self.line(line)?.ellipsis_start)
    }

    fn paragraph_direction(&self, line: usize) -> Result<Direction, LayoutError> {
        Ok(self.line(line)?.direction)
    }

    fn is_rtl_char_at(&self, offset: usize) -> Result<bool, LayoutError> {
        self.check_offset(offset)?;
        Ok(self.direction_of(offset).is_rtl())
    }

    fn line_baseline(&self, line: usize) -> Result<Px, LayoutError> {
        self.line(line)?;
        Ok(self.metrics.line_height * line as f32 + self.metrics.ascent)
    }

    fn primary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
        let line = self.line_for_offset(offset)?;
        self.cursor(offset, self.paragraph_direction(line)?)
    }

    fn secondary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
        self.check_offset(offset)?;
        self.cursor(offset, self.direction_of(offset))
    }

    fn line_left(&self, line: usize) -> Result<Px, LayoutError> {
        Ok(self.line(line)?.left)
    }

    fn line_right(&self, line: usize) -> Result<Px, LayoutError> {
        let line = self.line(line)?;
        Ok(line.left + line.max)
    }

    fn line_width(&self, line: usize) -> Result<Px, LayoutError> {
        Ok(self.line(line)?.width)
    }

    fn line_max(&self, line: usize) -> Result<Px, LayoutError> {
        Ok(self.line(line)?.max)
    }

    fn offset_for_horizontal(&self, line: usize, x: Px) -> Result<usize, LayoutError> {
        let info = self.line(line)?;
        let advance = *self.metrics.advance;
        let mut best: Option<(usize, f32)> = None;
        for offset in info.start..info.end.min(self.chars.len()) {
            let Some(left) = self.positions[offset] else {
                continue;
            };
            let distance = (*left + advance / 2.0 - *x).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((offset, distance));
            }
        }
        Ok(best.map(|(offset, _)| offset).unwrap_or(info.start))
    }
}
