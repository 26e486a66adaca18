//! Recording backend for tests: counts live GPU objects and logs every call.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use anyhow::Result;
use huetri_engine::coords::Viewport;

use super::Backend;
use crate::pipeline::{LinkedProgram, Vertex, VertexLayout};
use crate::uniforms::UniformBlock;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Kind {
    Program,
    Buffer,
    VertexArray,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub(crate) struct Live {
    pub programs: usize,
    pub buffers: usize,
    pub vertex_arrays: usize,
}

impl Live {
    fn slot(&mut self, kind: Kind) -> &mut usize {
        match kind {
            Kind::Program => &mut self.programs,
            Kind::Buffer => &mut self.buffers,
            Kind::VertexArray => &mut self.vertex_arrays,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Uniforms(Vec<u8>),
    Draw {
        viewport: Viewport,
        vertices: Range<u32>,
    },
}

#[derive(Debug, Default)]
pub(crate) struct Record {
    pub live: Live,
    pub released: Vec<Kind>,
    pub vertex_uploads: Vec<Vec<f32>>,
    pub ops: Vec<Op>,
}

impl Record {
    pub fn draws(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Draw { .. })).count()
    }

    pub fn last_uniforms(&self) -> Option<&[u8]> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Uniforms(bytes) => Some(bytes.as_slice()),
            _ => None,
        })
    }
}

struct Tracked {
    kind: Kind,
    record: Rc<RefCell<Record>>,
}

impl Tracked {
    fn new(kind: Kind, record: &Rc<RefCell<Record>>) -> Self {
        *record.borrow_mut().live.slot(kind) += 1;
        Self {
            kind,
            record: Rc::clone(record),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let mut r = self.record.borrow_mut();
        *r.live.slot(self.kind) -= 1;
        r.released.push(self.kind);
    }
}

pub(crate) struct MockProgram {
    _obj: Tracked,
}

/// Field order mirrors GL teardown: vertex array first, then buffer.
pub(crate) struct MockGeometry {
    _vertex_array: Tracked,
    _buffer: Tracked,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    pub record: Rc<RefCell<Record>>,
    pub fail_program: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MockBackend {
    type Program = MockProgram;
    type Geometry = MockGeometry;

    fn create_program(&mut self, _program: &LinkedProgram, _layout: VertexLayout) -> Result<MockProgram> {
        anyhow::ensure!(!self.fail_program, "mock program creation failure");
        Ok(MockProgram {
            _obj: Tracked::new(Kind::Program, &self.record),
        })
    }

    fn create_geometry(&mut self, vertices: &[Vertex], _layout: VertexLayout) -> MockGeometry {
        let floats: &[f32] = bytemuck::cast_slice(vertices);
        self.record.borrow_mut().vertex_uploads.push(floats.to_vec());
        MockGeometry {
            _buffer: Tracked::new(Kind::Buffer, &self.record),
            _vertex_array: Tracked::new(Kind::VertexArray, &self.record),
        }
    }

    fn write_uniforms(&mut self, _program: &MockProgram, block: &UniformBlock) {
        self.record
            .borrow_mut()
            .ops
            .push(Op::Uniforms(block.as_bytes().to_vec()));
    }

    fn draw(
        &mut self,
        _program: &MockProgram,
        _geometry: &MockGeometry,
        viewport: Viewport,
        vertices: Range<u32>,
    ) {
        self.record
            .borrow_mut()
            .ops
            .push(Op::Draw { viewport, vertices });
    }
}
