//! A [Baseline Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/base) implementation.
//!
//! Only the horizontal-axis default baseline coordinates are exposed; that is
//! what vertical layout needs to pick a baseline shift.

use crate::parser::{LazyArray16, Offset16, Stream, Tag};

/// A [Baseline Table](https://docs.microsoft.com/en-us/typography/opentype/spec/base).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    baseline_tags: LazyArray16<'a, Tag>,
    base_values: &'a [u8],
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        if !(version == 0x00010000 || version == 0x00010001) {
            return None;
        }

        let horiz_axis_offset: Option<Offset16> = s.read()?;
        // The vertical axis and format 1.1 variations are not used.

        let axis_data = data.get(horiz_axis_offset?.to_usize()..)?;
        let mut s = Stream::new(axis_data);
        let base_tag_list_offset: Option<Offset16> = s.read()?;
        let base_script_list_offset: Option<Offset16> = s.read()?;

        let baseline_tags = {
            let mut s = Stream::new(axis_data.get(base_tag_list_offset?.to_usize()..)?);
            let count = s.read::<u16>()?;
            s.read_array16::<Tag>(count)?
        };

        // Use the first script's default BaseValues. Per-script baselines are
        // out of proportion for the current layout needs.
        let script_list = axis_data.get(base_script_list_offset?.to_usize()..)?;
        let mut s = Stream::new(script_list);
        let script_count = s.read::<u16>()?;
        if script_count == 0 {
            return None;
        }
        s.skip::<Tag>(); // baseScriptTag
        let script_offset: Offset16 = s.read()?;

        let script_data = script_list.get(script_offset.to_usize()..)?;
        let mut s = Stream::new(script_data);
        let base_values_offset: Option<Offset16> = s.read()?;
        let base_values = script_data.get(base_values_offset?.to_usize()..)?;

        Some(Table {
            baseline_tags,
            base_values,
        })
    }

    /// Returns the coordinate of the baseline tagged `tag` (e.g. `romn`,
    /// `ideo`, `hang`).
    pub fn baseline(&self, tag: Tag) -> Option<i16> {
        let (index, _) = self.baseline_tags.binary_search(&tag)?;

        let mut s = Stream::new(self.base_values);
        s.skip::<u16>(); // defaultBaselineIndex
        let coord_count = s.read::<u16>()?;
        let coord_offsets = s.read_array16::<Offset16>(coord_count)?;

        let offset = coord_offsets.get(index)?;
        let mut s = Stream::new(self.base_values.get(offset.to_usize()..)?);
        let format: u16 = s.read()?;
        if format != 1 && format != 2 && format != 3 {
            return None;
        }

        s.read::<i16>()
    }
}
