//! The slides held in memory: the one on screen and the one after it.

use std::path::{Path, PathBuf};

use raylib::prelude::*;
use tracing::{info, warn};

use crate::slide::{Slide, SlideStyle};
use crate::source::ImageSource;
use crate::state::Slideshow;

pub struct Deck {
    style: SlideStyle,
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(style: SlideStyle) -> Self {
        Self { style, slides: Vec::with_capacity(2) }
    }

    /// Make the held slides match what `show` wants on screen.
    ///
    /// Slides no longer wanted are released before anything is loaded. An
    /// image that fails to load is dropped from both `source` and `show`,
    /// and the next candidate is tried in its place.
    pub fn sync(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        source: &mut ImageSource,
        show: &mut Slideshow,
    ) {
        loop {
            let wanted = wanted_slides(show, source);
            self.slides.retain(|slide| wanted.iter().any(|(_, path)| path == slide.path()));

            let Some((index, path)) = wanted
                .into_iter()
                .find(|(_, path)| self.get(path).is_none())
            else {
                return;
            };

            match Slide::load(rl, thread, &path, &self.style) {
                Ok(slide) => {
                    info!(
                        index,
                        path = %path.display(),
                        caption = slide.caption().unwrap_or(""),
                        "slide ready"
                    );
                    self.slides.push(slide);
                }
                Err(e) => {
                    warn!(index, error = %e, "could not load image, skipping");
                    source.remove(index);
                    show.remove(index);
                    if source.is_empty() {
                        warn!("no images remaining");
                    }
                }
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Slide> {
        self.slides.iter().find(|slide| slide.path() == path)
    }

    /// Held slide for a position in the source, if it is loaded.
    pub fn at(&self, source: &ImageSource, index: usize) -> Option<&Slide> {
        source.get(index).and_then(|path| self.get(path))
    }
}

/// Source positions and paths the slideshow needs right now, current first.
pub fn wanted_slides(show: &Slideshow, source: &ImageSource) -> Vec<(usize, PathBuf)> {
    [show.current(), show.upcoming()]
        .into_iter()
        .flatten()
        .filter_map(|index| source.get(index).map(|path| (index, path.to_path_buf())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Timing;

    const TIMING: Timing = Timing { rotation: 5.0, transition: 1.0 };

    fn source(names: &[&str]) -> ImageSource {
        ImageSource::from_paths(names.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn idle_wants_current_and_following() {
        let source = source(&["a.jpg", "b.jpg", "c.jpg"]);
        let show = Slideshow::new(3, TIMING);
        assert_eq!(
            wanted_slides(&show, &source),
            vec![(0, PathBuf::from("a.jpg")), (1, PathBuf::from("b.jpg"))]
        );
    }

    #[test]
    fn backward_fade_wants_both_ends() {
        let source = source(&["a.jpg", "b.jpg", "c.jpg"]);
        let mut show = Slideshow::new(3, TIMING);
        show.previous();
        assert_eq!(
            wanted_slides(&show, &source),
            vec![(0, PathBuf::from("a.jpg")), (2, PathBuf::from("c.jpg"))]
        );
    }

    #[test]
    fn single_image_wants_one_slide() {
        let source = source(&["a.jpg"]);
        let show = Slideshow::new(1, TIMING);
        assert_eq!(wanted_slides(&show, &source), vec![(0, PathBuf::from("a.jpg"))]);
    }

    #[test]
    fn empty_wants_nothing() {
        let source = source(&[]);
        let show = Slideshow::new(0, TIMING);
        assert!(wanted_slides(&show, &source).is_empty());
    }

    #[test]
    fn removal_in_both_keeps_paths_aligned() {
        let mut source = source(&["a.jpg", "b.jpg", "c.jpg"]);
        let mut show = Slideshow::new(3, TIMING);
        show.next();
        source.remove(1);
        show.remove(1);
        assert_eq!(
            wanted_slides(&show, &source),
            vec![(0, PathBuf::from("a.jpg")), (1, PathBuf::from("c.jpg"))]
        );
    }
}
