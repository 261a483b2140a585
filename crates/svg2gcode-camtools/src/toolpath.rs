//! Toolpath generation from geometry entities.
//!
//! Every entity is cut in order: rapid to its first point at safe height,
//! then one plunge-and-trace pass per depth level, retracting and returning
//! to the first point between passes. Closed entities are offset first when
//! cutter compensation is enabled.

use svg2gcode_designer::GeometryEntity;
use tracing::{debug, info, warn};

use crate::error::CamToolResult;
use crate::gcode::GcodeCommand;
use crate::offset::offset_polygon;
use crate::parameters::CutParameters;

/// Generator turning entities into an ordered instruction sequence
#[derive(Debug, Clone)]
pub struct ToolpathGenerator {
    params: CutParameters,
    header: bool,
}

impl ToolpathGenerator {
    /// Create a new generator with the given parameters
    pub fn new(params: CutParameters) -> Self {
        Self {
            params,
            header: true,
        }
    }

    /// Include parameter summary comments in the preamble
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Apply cutter compensation.
    ///
    /// Only closed entities are offset; open ones pass through. Offset
    /// results with fewer than two points are dropped.
    pub fn compensate(&self, entities: &[GeometryEntity]) -> Vec<GeometryEntity> {
        let Some(side) = self.params.compensation.side() else {
            return entities.to_vec();
        };
        if self.params.tool_diameter <= 0.0 {
            return entities.to_vec();
        }

        let delta = self.params.compensation_delta();
        debug!("Compensating {} by {:.4} source units", self.params.compensation, delta);

        entities
            .iter()
            .filter_map(|entity| {
                if !entity.closed {
                    return Some(entity.clone());
                }
                let points = offset_polygon(&entity.points, delta, side);
                if points.len() < 2 {
                    warn!("Dropping degenerate offset of entity with {} points", entity.len());
                    return None;
                }
                Some(GeometryEntity {
                    points,
                    closed: true,
                    color: entity.color.clone(),
                })
            })
            .collect()
    }

    /// Generate the full program.
    ///
    /// Parameters are validated first; nothing is produced if they are invalid.
    pub fn generate(&self, entities: &[GeometryEntity]) -> CamToolResult<Vec<GcodeCommand>> {
        self.params.validate()?;

        let p = &self.params;
        let depths = p.pass_depths();
        let entities = self.compensate(entities);
        info!(
            "Generating toolpaths for {} entities, {} pass(es) each",
            entities.len(),
            depths.len()
        );

        let mut program = Vec::new();
        self.push_preamble(&mut program, depths.len());

        for (index, entity) in entities.iter().enumerate() {
            if entity.is_empty() {
                continue;
            }
            self.push_entity(&mut program, index, entity, &depths);
        }

        program.push(GcodeCommand::SpindleStop);
        program.push(GcodeCommand::ProgramEnd);
        debug!("Generated {} instructions", program.len());
        Ok(program)
    }

    fn push_preamble(&self, program: &mut Vec<GcodeCommand>, passes: usize) {
        let p = &self.params;
        program.push(GcodeCommand::comment("Generated by svg2gcode"));
        if self.header {
            program.push(GcodeCommand::comment(format!(
                "Safe Z: {:.3} {units}, cut depth: {:.3} {units}, {} pass(es)",
                p.safe_z,
                p.cut_depth,
                passes,
                units = p.units
            )));
            program.push(GcodeCommand::comment(format!(
                "Feed: {:.1}, plunge: {:.1}, scale: {}",
                p.feed_rate, p.plunge_rate, p.scale
            )));
            if let Some(side) = p.compensation.side() {
                program.push(GcodeCommand::comment(format!(
                    "Compensation: {:?} with tool diameter {:.3} {}",
                    side, p.tool_diameter, p.units
                )));
            }
        }
        program.push(GcodeCommand::SetUnits(p.units));
        program.push(GcodeCommand::AbsoluteMode);
        program.push(GcodeCommand::rapid_z(p.safe_z));
    }

    fn push_entity(
        &self,
        program: &mut Vec<GcodeCommand>,
        index: usize,
        entity: &GeometryEntity,
        depths: &[f64],
    ) {
        let p = &self.params;
        let machine: Vec<_> = entity.points.iter().map(|&pt| p.to_machine(pt)).collect();
        let Some(&start) = machine.first() else {
            return;
        };

        debug!(
            "Path {}: {} points, closed={}",
            index + 1,
            machine.len(),
            entity.closed
        );
        program.push(GcodeCommand::comment(format!(
            "Path {} stroke={:?}",
            index + 1,
            entity.color
        )));
        program.push(GcodeCommand::rapid_xy(start.x, start.y));
        program.push(GcodeCommand::rapid_z(p.safe_z));

        for (pass, &z) in depths.iter().enumerate() {
            if pass > 0 {
                program.push(GcodeCommand::rapid_z(p.safe_z));
                program.push(GcodeCommand::rapid_xy(start.x, start.y));
            }
            program.push(GcodeCommand::plunge(z, p.plunge_rate));
            for pt in &machine[1..] {
                program.push(GcodeCommand::linear_xy(pt.x, pt.y, p.feed_rate));
            }
        }

        program.push(GcodeCommand::rapid_z(p.safe_z));
    }
}
