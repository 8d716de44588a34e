use std::cell::RefCell;

use cubeplay_notation::Face;

use crate::{
    ChangeNotifier, CubeError, CubeState, FaceGrid, ListenerId, ValidationReport, sticker_index,
};

/// Change to a [`CubeModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeEvent {
    /// One sticker was set.
    StickerChanged {
        /// Face containing the sticker.
        face: Face,
        /// Row within the face.
        row: usize,
        /// Column within the face.
        col: usize,
        /// New color of the sticker.
        symbol: Face,
    },
    /// All nine stickers of a face were replaced.
    FaceChanged {
        /// Face that was replaced.
        face: Face,
        /// New stickers.
        grid: FaceGrid,
    },
    /// The cube was reset to the solved state.
    Reset {
        /// New cube state.
        cube: CubeState,
    },
    /// The whole cube was replaced from a cube string.
    Restored {
        /// New cube state.
        cube: CubeState,
    },
}

/// Owner of the authoritative cube state.
///
/// All methods take `&self` so that the model can be shared (e.g., via `Rc`)
/// with listeners that mutate it in response to events. Every mutation is fully
/// applied before any listener runs.
#[derive(Debug, Default)]
pub struct CubeModel {
    state: RefCell<CubeState>,
    notifier: ChangeNotifier<CubeEvent>,
}

impl CubeModel {
    /// Constructs a model containing a solved cube.
    pub fn new() -> Self {
        Self::default()
    }
    /// Constructs a model containing `cube`.
    pub fn with_state(cube: CubeState) -> Self {
        Self {
            state: RefCell::new(cube),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Returns a copy of the current cube state.
    pub fn cube(&self) -> CubeState {
        *self.state.borrow()
    }

    /// Returns the color of a sticker.
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Result<Face, CubeError> {
        self.state.borrow().sticker(face, row, col)
    }
    /// Sets the color of a sticker and emits [`CubeEvent::StickerChanged`].
    ///
    /// `symbol` may be a [`Face`] or a `char` from the cube-string alphabet.
    pub fn set_sticker<S>(&self, face: Face, row: usize, col: usize, symbol: S) -> Result<(), CubeError>
    where
        S: TryInto<Face>,
        CubeError: From<S::Error>,
    {
        let symbol = symbol.try_into()?;
        self.state.borrow_mut().set_sticker(face, row, col, symbol)?;
        self.notifier.notify(CubeEvent::StickerChanged {
            face,
            row,
            col,
            symbol,
        });
        Ok(())
    }

    /// Returns the stickers of one face.
    pub fn face(&self, face: Face) -> FaceGrid {
        self.state.borrow().face(face)
    }
    /// Replaces all nine stickers of a face and emits a single
    /// [`CubeEvent::FaceChanged`].
    ///
    /// Nothing changes if any symbol is invalid.
    pub fn set_face<S>(&self, face: Face, grid: [[S; 3]; 3]) -> Result<(), CubeError>
    where
        S: TryInto<Face>,
        CubeError: From<S::Error>,
    {
        let mut new_grid = self.face(face);
        for (row, symbols) in grid.into_iter().enumerate() {
            for (col, symbol) in symbols.into_iter().enumerate() {
                new_grid[row][col] = symbol.try_into()?;
            }
        }
        self.state.borrow_mut().set_face(face, new_grid);
        self.notifier.notify(CubeEvent::FaceChanged {
            face,
            grid: new_grid,
        });
        Ok(())
    }

    /// Resets to the solved state and emits [`CubeEvent::Reset`].
    pub fn reset(&self) {
        let cube = CubeState::SOLVED;
        *self.state.borrow_mut() = cube;
        self.notifier.notify(CubeEvent::Reset { cube });
    }

    /// Replaces the whole cube from a cube string and emits
    /// [`CubeEvent::Restored`].
    ///
    /// The string must satisfy every primary invariant; otherwise nothing
    /// changes.
    pub fn set_cube_string(&self, s: &str) -> Result<(), CubeError> {
        let cube: CubeState = s.parse()?;
        *self.state.borrow_mut() = cube;
        self.notifier.notify(CubeEvent::Restored { cube });
        Ok(())
    }

    /// Checks the current cube against every invariant.
    pub fn validate(&self) -> ValidationReport {
        self.state.borrow().validate()
    }
    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.state.borrow().is_solved()
    }

    /// Registers a listener for change events.
    pub fn add_listener(
        &self,
        listener: impl 'static + Fn(&CubeEvent) -> eyre::Result<()>,
    ) -> ListenerId {
        self.notifier.add(listener)
    }
    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.notifier.remove(id)
    }
    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }

    /// Returns the index of a sticker within the cube string.
    pub fn index(face: Face, row: usize, col: usize) -> Result<usize, CubeError> {
        sticker_index(face, row, col)
    }
}
