// Player sprite animation: frame-range clips in an enum-indexed arena

/// A frame-range animation clip with its own playback cursor.
///
/// Frames are absolute indices into the player sprite sheet. A clip with
/// `seconds_per_frame == 0` is a static pose that never advances and never
/// finishes.
#[derive(Debug, Clone)]
pub struct Clip {
    /// First frame of the range (inclusive)
    first: u32,
    /// Last frame of the range (inclusive)
    last: u32,
    /// Duration of each frame in seconds; 0 marks a static pose
    seconds_per_frame: f32,
    /// Whether the clip wraps back to `first` after `last`
    looping: bool,

    // Playback cursor, owned by the clip itself so that re-selecting a clip
    // resumes where it left off
    /// Current frame index
    frame: u32,
    /// Time accumulated toward the next frame step
    elapsed: f32,
    /// Set once a non-looping clip has played through; blocks re-firing
    done: bool,
}

impl Clip {
    /// Create a one-shot clip covering `first..=last`
    pub fn new(first: u32, last: u32, seconds_per_frame: f32) -> Self {
        Self {
            first,
            last,
            seconds_per_frame,
            looping: false,
            frame: first,
            elapsed: 0.0,
            done: false,
        }
    }

    /// Create a looping clip covering `first..=last`
    pub fn looping(first: u32, last: u32, seconds_per_frame: f32) -> Self {
        Self {
            looping: true,
            ..Self::new(first, last, seconds_per_frame)
        }
    }

    /// Create a static single-pose clip
    pub fn still(frame: u32) -> Self {
        Self::new(frame, frame, 0.0)
    }

    /// Advance the cursor by `dt` seconds.
    ///
    /// Each elapsed multiple of `seconds_per_frame` steps one frame, so a
    /// large `dt` may step several. Returns `true` exactly once, when a
    /// non-looping clip first plays past its last frame; the clip then holds
    /// there until restarted. `dt <= 0` never regresses the cursor.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt <= 0.0 || self.seconds_per_frame <= 0.0 || self.done {
            return false;
        }

        self.elapsed += dt;
        while self.elapsed >= self.seconds_per_frame {
            self.elapsed -= self.seconds_per_frame;

            if self.frame < self.last {
                self.frame += 1;
            } else if self.looping {
                self.frame = self.first;
            } else {
                // Hold on the last frame; report completion exactly once
                self.done = true;
                return true;
            }
        }
        false
    }

    /// Rewind to the first frame and re-arm the finished notification
    pub fn restart(&mut self) {
        self.frame = self.first;
        self.elapsed = 0.0;
        self.done = false;
    }

    /// Current sprite sheet frame index
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Whether a non-looping clip has played through
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Total playback duration of one cycle (0 for static poses)
    pub fn total_duration(&self) -> f32 {
        (self.last - self.first + 1) as f32 * self.seconds_per_frame
    }
}

/// Identifies one of the player's animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipId {
    /// Standing still on ground
    Standing,
    /// Walking on ground
    Walking,
    /// Jump launch pose (piston strike)
    Jumping,
    /// Falling through the air
    Falling,
    /// Airborne idle (after an aerial swing resolves)
    Aerial,
    /// Vertical swing, grounded
    VSwing,
    /// Vertical swing, airborne
    VSwingAerial,
    /// Horizontal swing, grounded
    HSwing,
    /// Horizontal swing, airborne
    HSwingAerial,
}

impl ClipId {
    /// All clips, in arena order
    pub const ALL: [ClipId; 9] = [
        ClipId::Standing,
        ClipId::Walking,
        ClipId::Jumping,
        ClipId::Falling,
        ClipId::Aerial,
        ClipId::VSwing,
        ClipId::VSwingAerial,
        ClipId::HSwing,
        ClipId::HSwingAerial,
    ];

    /// Whether this clip is one of the four attack swings
    pub fn is_swing(self) -> bool {
        matches!(
            self,
            ClipId::VSwing | ClipId::VSwingAerial | ClipId::HSwing | ClipId::HSwingAerial
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Arena of the player's animation clips.
///
/// Clips are created once and selected by id; each slot keeps its own
/// cursor, so switching away and back resumes mid-cycle (deliberate, for
/// visual continuity). Discrete triggers that need a fresh playback call
/// `restart` explicitly.
#[derive(Debug)]
pub struct AnimationSet {
    clips: [Clip; 9],
}

impl AnimationSet {
    /// Build the player's clip arena with sprite sheet frame ranges
    pub fn player_clips() -> Self {
        Self {
            clips: [
                Clip::still(0),                    // Standing
                Clip::looping(1, 6, 0.667),        // Walking
                Clip::still(17),                   // Jumping
                Clip::new(18, 19, 0.1),            // Falling
                Clip::still(19),                   // Aerial
                Clip::new(20, 23, 0.15),           // VSwing
                Clip::new(40, 43, 0.15),           // VSwingAerial
                Clip::new(24, 26, 0.15),           // HSwing
                Clip::new(44, 46, 0.15),           // HSwingAerial
            ],
        }
    }

    /// Advance the given clip; returns `true` when it just finished
    pub fn advance(&mut self, id: ClipId, dt: f32) -> bool {
        self.clips[id.index()].advance(dt)
    }

    /// Rewind the given clip to its first frame
    pub fn restart(&mut self, id: ClipId) {
        self.clips[id.index()].restart();
    }

    /// Current sprite sheet frame of the given clip, for the render layer
    pub fn frame(&self, id: ClipId) -> u32 {
        self.clips[id.index()].frame()
    }

    /// Borrow a clip (read-only)
    pub fn clip(&self, id: ClipId) -> &Clip {
        &self.clips[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_clip_never_advances() {
        let mut clip = Clip::still(17);
        assert!(!clip.advance(100.0));
        assert_eq!(clip.frame(), 17);
        assert!(!clip.is_done());
    }

    // Frame periods in these tests are powers of two (0.25, 0.125) so the
    // accumulator arithmetic is exact in f32

    #[test]
    fn test_advances_one_frame_per_period() {
        let mut clip = Clip::new(18, 19, 0.25);
        assert!(!clip.advance(0.25));
        assert_eq!(clip.frame(), 19);
    }

    #[test]
    fn test_large_dt_advances_multiple_frames() {
        let mut clip = Clip::looping(1, 6, 0.25);
        clip.advance(0.875); // 3.5 periods
        assert_eq!(clip.frame(), 4);
    }

    #[test]
    fn test_looping_wraps_and_never_finishes() {
        let mut clip = Clip::looping(1, 3, 0.25);
        // 1 -> 2 -> 3 -> 1
        assert!(!clip.advance(0.75));
        assert_eq!(clip.frame(), 1);
        assert!(!clip.advance(10.0));
        assert!(!clip.is_done());
    }

    #[test]
    fn test_one_shot_finishes_exactly_once_and_holds() {
        let mut clip = Clip::new(20, 23, 0.25);
        // 4 frames: completion at 4 * 0.25 = 1.0s
        assert!(!clip.advance(0.75));
        assert_eq!(clip.frame(), 23);
        assert!(clip.advance(0.25));
        assert_eq!(clip.frame(), 23); // holds at last
        assert!(!clip.advance(1.0)); // not re-raised while holding
        assert!(clip.is_done());
    }

    #[test]
    fn test_split_equals_summed_advancement() {
        let mut split = Clip::new(0, 4, 0.25);
        let mut whole = Clip::new(0, 4, 0.25);

        let mut split_finishes = 0;
        for _ in 0..10 {
            if split.advance(0.125) {
                split_finishes += 1;
            }
        }
        let whole_finishes = if whole.advance(1.25) { 1 } else { 0 };

        assert_eq!(split.frame(), whole.frame());
        assert_eq!(split_finishes, whole_finishes);
        assert_eq!(split_finishes, 1);
    }

    #[test]
    fn test_negative_dt_never_regresses() {
        let mut clip = Clip::new(18, 19, 0.25);
        clip.advance(0.25);
        let frame = clip.frame();
        assert!(!clip.advance(-1.0));
        assert_eq!(clip.frame(), frame);
    }

    #[test]
    fn test_restart_rearms_finished() {
        let mut clip = Clip::new(20, 23, 0.25);
        clip.advance(2.0);
        assert!(clip.is_done());

        clip.restart();
        assert_eq!(clip.frame(), 20);
        assert!(!clip.is_done());
        assert!(clip.advance(1.0)); // fires again after restart
    }

    #[test]
    fn test_total_duration() {
        let clip = Clip::new(20, 23, 0.15);
        assert_relative_eq!(clip.total_duration(), 0.6, epsilon = 1e-6);
        assert_relative_eq!(Clip::still(0).total_duration(), 0.0);
    }

    #[test]
    fn test_swing_ids() {
        assert!(ClipId::VSwing.is_swing());
        assert!(ClipId::HSwingAerial.is_swing());
        assert!(!ClipId::Walking.is_swing());
        assert!(!ClipId::Standing.is_swing());
    }

    #[test]
    fn test_player_clip_frames() {
        let set = AnimationSet::player_clips();
        assert_eq!(set.frame(ClipId::Standing), 0);
        assert_eq!(set.frame(ClipId::Jumping), 17);
        assert_eq!(set.frame(ClipId::VSwingAerial), 40);
    }

    #[test]
    fn test_set_resumes_cursor_across_selection() {
        let mut set = AnimationSet::player_clips();
        set.advance(ClipId::Walking, 0.667);
        let mid_cursor = set.frame(ClipId::Walking);
        assert_eq!(mid_cursor, 2);

        // "Switching away" is just advancing a different clip; Walking's
        // cursor is untouched until explicitly restarted
        set.advance(ClipId::Falling, 0.1);
        assert_eq!(set.frame(ClipId::Walking), mid_cursor);

        set.restart(ClipId::Walking);
        assert_eq!(set.frame(ClipId::Walking), 1);
    }
}
