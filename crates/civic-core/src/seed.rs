//! Built-in sample dataset: five issues across every status.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{
    Assignee, Category, CitizenVerification, Issue, Location, Priority, Reporter, Status,
    VerificationStatus,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn reporter(id: &str, name: &str, email: &str) -> Reporter {
    Reporter {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn assignee(id: &str, name: &str, department: &str) -> Option<Assignee> {
    Some(Assignee {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
    })
}

fn location(lat: f64, lng: f64, address: &str) -> Location {
    Location {
        lat,
        lng,
        address: address.to_string(),
    }
}

/// The sample issues, in display order (ids `1` through `5`).
#[must_use]
pub fn sample_issues() -> Vec<Issue> {
    vec![
        Issue {
            id: "1".to_string(),
            title: "Large Pothole on Main Street".to_string(),
            description: "A dangerous pothole that has been growing larger after recent rains. \
                          It's affecting multiple lanes and could damage vehicles."
                .to_string(),
            category: Category::Infrastructure,
            status: Status::Open,
            priority: Priority::High,
            location: location(40.7589, -73.9851, "123 Main Street, New York, NY 10001"),
            reported_by: reporter("user1", "John Smith", "john.smith@email.com"),
            assigned_to: None,
            images: vec![
                "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400".to_string(),
            ],
            created_at: at(2024, 1, 15, 8, 30),
            updated_at: at(2024, 1, 15, 8, 30),
            resolved_at: None,
            citizen_verification: None,
        },
        Issue {
            id: "2".to_string(),
            title: "Broken Streetlight".to_string(),
            description: "Streetlight has been out for 3 days, making the intersection unsafe \
                          at night."
                .to_string(),
            category: Category::Safety,
            status: Status::InProgress,
            priority: Priority::Medium,
            location: location(40.7614, -73.9776, "456 Oak Avenue, New York, NY 10001"),
            reported_by: reporter("user2", "Sarah Johnson", "sarah.j@email.com"),
            assigned_to: assignee("worker1", "Mike Rodriguez", "Public Works"),
            images: vec![
                "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400".to_string(),
            ],
            created_at: at(2024, 1, 12, 14, 20),
            updated_at: at(2024, 1, 14, 9, 15),
            resolved_at: None,
            citizen_verification: None,
        },
        Issue {
            id: "3".to_string(),
            title: "Overflowing Trash Bin".to_string(),
            description: "Public trash bin is overflowing and attracting pests. Needs immediate \
                          attention."
                .to_string(),
            category: Category::Sanitation,
            status: Status::Resolved,
            priority: Priority::Medium,
            location: location(40.7505, -73.9934, "789 Park Lane, New York, NY 10001"),
            reported_by: reporter("user3", "Maria Garcia", "maria.garcia@email.com"),
            assigned_to: assignee("worker2", "David Chen", "Sanitation"),
            images: vec![
                "https://images.unsplash.com/photo-1586021280827-6f881d9e1506?w=400".to_string(),
            ],
            created_at: at(2024, 1, 10, 11, 45),
            updated_at: at(2024, 1, 13, 16, 30),
            resolved_at: Some(at(2024, 1, 13, 16, 30)),
            citizen_verification: Some(CitizenVerification::pending()),
        },
        Issue {
            id: "4".to_string(),
            title: "Graffiti on Public Building".to_string(),
            description: "Large graffiti tags on the side of the community center building."
                .to_string(),
            category: Category::Environment,
            status: Status::Closed,
            priority: Priority::Low,
            location: location(40.7648, -73.9808, "321 Community Drive, New York, NY 10001"),
            reported_by: reporter("user4", "Robert Wilson", "r.wilson@email.com"),
            assigned_to: assignee("worker3", "Lisa Thompson", "Parks & Recreation"),
            images: vec![
                "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?w=400".to_string(),
            ],
            created_at: at(2024, 1, 8, 9, 15),
            updated_at: at(2024, 1, 11, 14, 20),
            resolved_at: Some(at(2024, 1, 11, 14, 20)),
            citizen_verification: Some(CitizenVerification {
                status: VerificationStatus::Verified,
                verified_at: Some(at(2024, 1, 12, 8, 30)),
                comment: Some("Fixed perfectly, thanks!".to_string()),
            }),
        },
        Issue {
            id: "5".to_string(),
            title: "Damaged Bus Stop".to_string(),
            description: "Bus stop shelter has broken glass and damaged seating, needs repair."
                .to_string(),
            category: Category::Transportation,
            status: Status::Open,
            priority: Priority::Medium,
            location: location(40.7580, -73.9855, "555 Transit Avenue, New York, NY 10001"),
            reported_by: reporter("user5", "Jennifer Lee", "j.lee@email.com"),
            assigned_to: None,
            images: vec![
                "https://images.unsplash.com/photo-1544620347-c4fd4a3d5957?w=400".to_string(),
            ],
            created_at: at(2024, 1, 14, 16, 45),
            updated_at: at(2024, 1, 14, 16, 45),
            resolved_at: None,
            citizen_verification: None,
        },
    ]
}
