//! Course layout: tees and goal volumes
//!
//! Courses are played in order and wrap around after the last one.

use crate::core::CourseConfig;
use crate::foundation::math::Vec3;
use crate::physics::collision::{BoxCollider, Collider, CourseId};

/// One hole
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Tag carried by this course's geometry
    pub tag: CourseId,
    /// Where the ball is placed when the course starts
    pub tee: Vec3,
    /// Trigger volume the ball has to come to rest in
    pub goal: BoxCollider,
}

/// Ordered set of courses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseSet {
    courses: Vec<Course>,
}

impl CourseSet {
    /// Create a set from courses in play order
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Build courses from configuration; course `i` is tagged `CourseId(i)`
    pub fn from_config(configs: &[CourseConfig]) -> Self {
        let courses = configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                let tag = CourseId(index);
                Course {
                    tag,
                    tee: config.tee_position(),
                    goal: BoxCollider::axis_aligned(
                        config.goal_position(),
                        Vec3::from(config.goal_half_extents),
                    )
                    .with_tag(tag),
                }
            })
            .collect();
        Self { courses }
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether there are no courses
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Course at `index`
    pub fn get(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    /// Iterate in play order
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Index of the course after `index`, wrapping to the first
    pub fn next_index(&self, index: usize) -> usize {
        if self.courses.is_empty() {
            0
        } else {
            (index + 1) % self.courses.len()
        }
    }

    /// Whether `probe` overlaps the goal volume of course `index`
    pub fn goal_contains(&self, index: usize, probe: &dyn Collider) -> bool {
        self.courses
            .get(index)
            .is_some_and(|course| course.goal.collides_with(probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::SphereCollider;

    fn three_courses() -> CourseSet {
        CourseSet::from_config(&[
            CourseConfig::new([0.0, 0.1, 0.0], [5.0, 0.0, 0.0]),
            CourseConfig::new([20.0, 0.1, 0.0], [25.0, 0.0, 0.0]),
            CourseConfig::new([40.0, 0.1, 0.0], [45.0, 0.0, 0.0]),
        ])
    }

    #[test]
    fn test_from_config_tags_in_order() {
        let courses = three_courses();
        assert_eq!(courses.len(), 3);
        for (index, course) in courses.iter().enumerate() {
            assert_eq!(course.tag, CourseId(index));
            assert_eq!(course.goal.tag(), Some(CourseId(index)));
        }
        assert_eq!(courses.get(1).map(|c| c.tee), Some(Vec3::new(20.0, 0.1, 0.0)));
    }

    #[test]
    fn test_next_index_wraps() {
        let courses = three_courses();
        assert_eq!(courses.next_index(0), 1);
        assert_eq!(courses.next_index(2), 0);
        assert_eq!(CourseSet::default().next_index(5), 0);
    }

    #[test]
    fn test_goal_contains() {
        let courses = three_courses();
        let in_cup = SphereCollider::new(Vec3::new(25.1, 0.06, 0.05), 0.06);
        let beside = SphereCollider::new(Vec3::new(25.5, 0.06, 0.0), 0.06);

        assert!(courses.goal_contains(1, &in_cup));
        assert!(!courses.goal_contains(0, &in_cup));
        assert!(!courses.goal_contains(1, &beside));
        assert!(!courses.goal_contains(7, &in_cup));
    }
}
