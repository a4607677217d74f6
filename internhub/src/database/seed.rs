//! First-run seeding
//!
//! Writes a bundled default dataset into every collection whose key is
//! absent. A key that exists is never touched, even when it holds an empty
//! array, so seeding is idempotent.

use super::models::*;
use super::store::Store;
use crate::config::*;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Seed every missing collection. Safe to call any number of times.
pub async fn ensure_seeded(store: &Store) -> Result<()> {
    let mut seeded = 0;

    for key in COLLECTION_KEYS {
        if store.contains_key(key).await? {
            continue;
        }

        match key {
            USERS_KEY => write::<User>(store, key, default_users()).await?,
            JOBS_KEY => write::<Job>(store, key, default_jobs()).await?,
            APPLICATIONS_KEY => write::<Application>(store, key, default_applications()).await?,
            HACKATHONS_KEY => write::<Hackathon>(store, key, default_hackathons()).await?,
            COURSES_KEY => write::<Course>(store, key, default_courses()).await?,
            RESOURCES_KEY => write::<Resource>(store, key, default_resources()).await?,
            ANNOUNCEMENTS_KEY => write::<Announcement>(store, key, default_announcements()).await?,
            _ => store.set_collection::<Value>(key, &[]).await?,
        }

        tracing::info!("Seeded collection: {}", key);
        seeded += 1;
    }

    if seeded == 0 {
        tracing::debug!("All collections present, nothing to seed");
    }

    Ok(())
}

/// Parse the bundled JSON as `T` so a malformed default fails loudly here
/// rather than reading back as an empty collection later.
async fn write<T>(store: &Store, key: &str, data: Value) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let items: Vec<T> = serde_json::from_value(data)?;
    store.set_collection(key, &items).await
}

fn default_users() -> Value {
    json!([
        {
            "id": "admin1",
            "role": "Admin",
            "name": "Placement Cell",
            "email": "admin@internhub.edu",
            "approved": true
        },
        {
            "id": "student1",
            "role": "Student",
            "name": "Aarav Sharma",
            "email": "aarav@student.internhub.edu",
            "approved": true,
            "cgpa": 8.4,
            "branch": "CSE",
            "skills": ["Rust", "React", "SQL"],
            "resumeUrl": "https://example.com/resumes/aarav.pdf"
        },
        {
            "id": "student2",
            "role": "Student",
            "name": "Diya Patel",
            "email": "diya@student.internhub.edu",
            "approved": true,
            "cgpa": 7.1,
            "branch": "ECE",
            "skills": ["Embedded C", "MATLAB"]
        },
        {
            "id": "student3",
            "role": "Student",
            "name": "Kabir Singh",
            "email": "kabir@student.internhub.edu",
            "approved": true,
            "cgpa": 6.5,
            "branch": "ME",
            "skills": ["AutoCAD", "SolidWorks"]
        },
        {
            "id": "company1",
            "role": "Company",
            "name": "Priya Rao",
            "companyName": "TechCorp Solutions",
            "email": "hr@techcorp.example.com",
            "approved": true,
            "website": "https://techcorp.example.com",
            "description": "Product engineering for fintech platforms"
        },
        {
            "id": "company2",
            "role": "Company",
            "name": "Rohan Mehta",
            "companyName": "Circuit Labs",
            "email": "careers@circuitlabs.example.com",
            "approved": false,
            "website": "https://circuitlabs.example.com"
        }
    ])
}

fn default_jobs() -> Value {
    json!([
        {
            "id": "job1",
            "companyId": "company1",
            "companyName": "TechCorp Solutions",
            "title": "Software Engineering Intern",
            "description": "Work on backend services and internal tooling.",
            "package": 30000,
            "location": "Bengaluru",
            "type": "Internship",
            "deadline": "2026-12-15",
            "eligibility": { "minCGPA": 7.5, "branches": ["CSE", "IT"] },
            "rounds": ["Online Assessment", "Technical Interview", "HR Interview"],
            "postedDate": "2026-09-20",
            "status": "Active"
        },
        {
            "id": "job2",
            "companyId": "company2",
            "companyName": "Circuit Labs",
            "title": "Embedded Systems Engineer",
            "description": "Firmware development for IoT devices.",
            "package": 850000,
            "location": "Hyderabad",
            "type": "FullTime",
            "deadline": "2026-11-30",
            "eligibility": { "minCGPA": 7.0, "branches": ["ECE", "EEE"] },
            "rounds": ["Aptitude Test", "Technical Interview"],
            "postedDate": "2026-09-12",
            "status": "Active"
        },
        {
            "id": "job3",
            "companyId": "company1",
            "companyName": "TechCorp Solutions",
            "title": "Graduate Analyst",
            "description": "Open to all branches. Data analysis and reporting.",
            "package": 600000,
            "location": "Remote",
            "type": "FullTime",
            "deadline": "2027-01-10",
            "eligibility": { "minCGPA": 6.0, "branches": [] },
            "rounds": ["Case Study", "Interview"],
            "postedDate": "2026-09-01",
            "status": "Active"
        }
    ])
}

fn default_applications() -> Value {
    json!([
        {
            "id": "app1",
            "jobId": "job1",
            "studentId": "student1",
            "studentName": "Aarav Sharma",
            "jobTitle": "Software Engineering Intern",
            "companyName": "TechCorp Solutions",
            "status": "Shortlisted",
            "appliedDate": "2026-09-25"
        },
        {
            "id": "app2",
            "jobId": "job2",
            "studentId": "student2",
            "studentName": "Diya Patel",
            "jobTitle": "Embedded Systems Engineer",
            "companyName": "Circuit Labs",
            "status": "Applied",
            "appliedDate": "2026-09-18"
        }
    ])
}

fn default_hackathons() -> Value {
    json!([
        {
            "id": "hack1",
            "title": "Smart India Hackathon",
            "organizer": "Ministry of Education",
            "logo": "M",
            "deadline": "2026-11-20",
            "startDate": "2026-12-05",
            "endDate": "2026-12-06",
            "postedDate": "2026-09-15",
            "prize": "₹1,00,000",
            "participants": 420,
            "mode": "Hybrid",
            "tags": ["GovTech", "Open Innovation"],
            "difficulty": "Intermediate",
            "description": "Nationwide hackathon solving problem statements from ministries.",
            "registrationUrl": "https://sih.gov.in",
            "status": "Upcoming"
        },
        {
            "id": "hack2",
            "title": "Rust Systems Jam",
            "organizer": "Open Source Club",
            "logo": "O",
            "deadline": "2026-10-30",
            "startDate": "2026-11-08",
            "endDate": "2026-11-09",
            "postedDate": "2026-10-01",
            "prize": "Swag and mentorship",
            "participants": 85,
            "mode": "Online",
            "tags": ["Rust", "Systems"],
            "difficulty": "Advanced",
            "description": "48 hours to build fast, safe tooling.",
            "registrationUrl": "https://example.com/rust-jam",
            "status": "Upcoming"
        }
    ])
}

fn default_courses() -> Value {
    json!([
        {
            "id": "course1",
            "title": "Data Structures and Algorithms",
            "description": "Arrays to graphs with interview-style problems.",
            "instructor": "Prof. Anita Desai",
            "duration": "12 hours",
            "lessons": 40,
            "level": "Intermediate",
            "category": "Programming",
            "thumbnail": "https://img.youtube.com/vi/8hly31xKli0/hqdefault.jpg",
            "youtubeUrl": "https://www.youtube.com/watch?v=8hly31xKli0",
            "rating": 4.8,
            "students": 1520,
            "isFree": true,
            "tags": ["DSA", "Interview Prep"],
            "status": "Active"
        },
        {
            "id": "course2",
            "title": "Aptitude for Placements",
            "description": "Quantitative, logical and verbal reasoning drills.",
            "instructor": "Placement Cell",
            "duration": "6 hours",
            "lessons": 18,
            "level": "Beginner",
            "category": "Aptitude",
            "thumbnail": "https://img.youtube.com/vi/qU6GTnW2xO4/hqdefault.jpg",
            "youtubeUrl": "https://youtu.be/qU6GTnW2xO4",
            "rating": 4.5,
            "students": 980,
            "isFree": true,
            "tags": ["Aptitude"],
            "status": "Active"
        },
        {
            "id": "course3",
            "title": "System Design Fundamentals",
            "description": "Scalability, caching, queues and storage trade-offs.",
            "instructor": "Vikram Iyer",
            "duration": "8 hours",
            "lessons": 22,
            "level": "Advanced",
            "category": "Engineering",
            "thumbnail": "https://img.youtube.com/vi/i53Gi_K3o7I/hqdefault.jpg",
            "youtubeUrl": "https://www.youtube.com/watch?v=i53Gi_K3o7I",
            "rating": 4.7,
            "students": 640,
            "isFree": false,
            "tags": ["System Design"],
            "status": "Draft"
        }
    ])
}

fn default_resources() -> Value {
    json!([
        {
            "id": "res1",
            "title": "Resume Writing Guide",
            "type": "pdf",
            "category": "Resume",
            "url": "https://example.com/guides/resume.pdf",
            "isNew": true
        },
        {
            "id": "res2",
            "title": "Mock Interview Walkthrough",
            "type": "video",
            "category": "Interview",
            "duration": "25 min",
            "url": "https://www.youtube.com/watch?v=1qw5ITr3k9E",
            "isNew": false
        },
        {
            "id": "res3",
            "title": "How to Answer Behavioural Questions",
            "type": "article",
            "category": "Interview",
            "url": "https://example.com/articles/behavioural",
            "isNew": false
        },
        {
            "id": "res4",
            "title": "Company Preparation Tracker",
            "type": "link",
            "category": "Planning",
            "url": "https://example.com/tracker",
            "isNew": true
        }
    ])
}

fn default_announcements() -> Value {
    json!([
        {
            "id": "ann1",
            "title": "Placement Season Begins",
            "message": "Registrations for the placement season are now open. Keep your profile updated.",
            "type": "info",
            "createdAt": "2026-09-01T09:00:00Z",
            "createdBy": "Placement Cell",
            "isActive": true,
            "readBy": []
        },
        {
            "id": "ann2",
            "title": "Resume Submission Deadline",
            "message": "Upload your final resume before the end of the month.",
            "type": "urgent",
            "createdAt": "2026-09-10T09:00:00Z",
            "createdBy": "Placement Cell",
            "expiresAt": "2026-12-31T23:59:59Z",
            "isActive": true,
            "readBy": []
        }
    ])
}
